use std::io::{self, Write};

use super::config::OutputConfig;
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}: {}", env.stage.label(), env.op)?;
        if let Some(run) = &env.run {
            writeln!(w, "  pages={} records={} duration_ms={}", run.pages, run.records, run.duration_ms)?;
        }
        if self.pretty {
            serde_json::to_writer_pretty(&mut *w, &env.body).map_err(to_io)?;
            writeln!(w)?;
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = if cfg.json {
            Box::new(JsonPresenter { pretty: cfg.pretty })
        } else {
            Box::new(TextPresenter { pretty: cfg.pretty })
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout();
        self.emit_to(env, &mut out)?;
        out.flush()
    }

    pub fn emit_to(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        self.presenter.emit(env, w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::output::types::{RunMeta, Stage};

    fn emit(json: bool, pretty: bool, env: &Envelope) -> String {
        let mut buf: Vec<u8> = Vec::new();
        Emitter::new(OutputConfig { json, pretty }).emit_to(env, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn json_is_one_line() {
        let env = Envelope::new("scrape", Stage::Result, &json!({"extracted": 2})).unwrap();
        let out = emit(true, false, &env);
        assert_eq!(out.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(v["body"]["extracted"], 2);
    }

    #[test]
    fn text_header_and_pretty_body() {
        let env = Envelope::new("scrape", Stage::Plan, &json!({"pages": 3})).unwrap();
        assert_eq!(emit(false, false, &env), "Plan: scrape\n");
        let pretty = emit(false, true, &env);
        assert!(pretty.starts_with("Plan: scrape\n{"));
        assert!(pretty.contains("\"pages\": 3"));
    }

    #[test]
    fn text_shows_run_figures() {
        let env = Envelope::new("scrape", Stage::Result, &json!({}))
            .unwrap()
            .with_run(RunMeta { duration_ms: 10, pages: 2, records: 5 });
        assert_eq!(emit(false, false, &env), "Result: scrape\n  pages=2 records=5 duration_ms=10\n");
    }
}
