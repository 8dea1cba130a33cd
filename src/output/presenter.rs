use std::io::{self, Write};

use serde_json::Value;

use super::config::{OutputConfig, OutputFormat};
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
        let label = if env.apply { "Result" } else { "Plan" };
        match env.meta.as_ref().and_then(|m| m.pass_id) {
            Some(pass_id) => writeln!(w, "{}: {} (pass {})", label, env.op, pass_id)?,
            None => writeln!(w, "{}: {}", label, env.op)?,
        }
        if let Some(body) = env.body() {
            if let Some(msg) = body.get("message").and_then(Value::as_str) {
                writeln!(w, "  {}", msg)?;
            }
            if let Some(products) = body.get("products").and_then(Value::as_array) {
                for p in products { writeln!(w, "  {}", product_line(p))?; }
            }
            if self.pretty { serde_json::to_writer_pretty(&mut *w, body).map_err(to_io)?; writeln!(w)?; }
        }
        Ok(())
    }
}

fn product_line(p: &Value) -> String {
    let flag = |key: &str, label: &'static str| if p.get(key).and_then(Value::as_bool).unwrap_or(false) { label } else { "" };
    format!(
        "[{}/{}] {} price={} qty={}{}{}",
        p.get("wishlist_id").unwrap_or(&Value::Null),
        p.get("id").unwrap_or(&Value::Null),
        p.get("name").and_then(Value::as_str).unwrap_or("?"),
        p.get("price").unwrap_or(&Value::Null),
        p.get("quantity").unwrap_or(&Value::Null),
        flag("is_gift", " gift"),
        flag("purchased", " purchased"),
    )
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_env(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
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
