pub mod config;
pub mod ctx;
pub mod ops;

use std::marker::PhantomData;

use config::LogFormat;
use ctx::LogCtx;

fn ctx<O: ctx::OpMarker>() -> LogCtx<O> {
    LogCtx { json: LogFormat::from_env() == LogFormat::Json, _marker: PhantomData }
}

pub fn scrape() -> LogCtx<ops::scrape::Scrape> { ctx() }
pub fn inspect() -> LogCtx<ops::inspect::Inspect> { ctx() }
