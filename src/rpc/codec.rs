//! XML-RPC document encoding and decoding
//!
//! Requests are written directly as text. Responses are read with
//! `quick-xml` into a flat token list first, then parsed by a small
//! recursive-descent parser over that list.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::Value;

/// A decoded `<methodResponse>`
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Value),
    Fault { code: i64, message: String },
}

/// Encode a `<methodCall>` document
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>\n");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(i) => {
            if i32::try_from(*i).is_ok() {
                let _ = write!(out, "<int>{i}</int>");
            } else {
                let _ = write!(out, "<i8>{i}</i8>");
            }
        }
        Value::Boolean(b) => {
            let _ = write!(out, "<boolean>{}</boolean>", u8::from(*b));
        }
        Value::String(s) => {
            let _ = write!(out, "<string>{}</string>", escape(s));
        }
        Value::Double(d) => {
            let _ = write!(out, "<double>{d}</double>");
        }
        Value::DateTime(s) => {
            let _ = write!(out, "<dateTime.iso8601>{}</dateTime.iso8601>", escape(s));
        }
        Value::Base64(s) => {
            let _ = write!(out, "<base64>{}</base64>", escape(s));
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                let _ = write!(out, "<member><name>{}</name>", escape(name));
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}

/// Decode a `<methodResponse>` document
///
/// Errors are plain strings; the caller attaches the method name.
pub fn decode_response(xml: &str) -> Result<Response, String> {
    let tokens = tokenize(xml)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.response()
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open(String),
    Close(String),
    Empty(String),
    Text(String),
}

fn tokenize(xml: &str) -> Result<Vec<Token>, String> {
    let mut reader = Reader::from_str(xml);
    let mut tokens = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("invalid XML at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => tokens.push(Token::Open(element_name(e.name().as_ref()))),
            Event::End(e) => tokens.push(Token::Close(element_name(e.name().as_ref()))),
            Event::Empty(e) => tokens.push(Token::Empty(element_name(e.name().as_ref()))),
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| format!("invalid text: {e}"))?;
                push_text(&mut tokens, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                push_text(&mut tokens, &String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tokens)
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Adjacent text and CDATA sections form one text node
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Skip whitespace between structural elements
    fn skip_ws(&mut self) {
        while let Some(Token::Text(t)) = self.peek() {
            if !t.trim().is_empty() {
                break;
            }
            self.pos += 1;
        }
    }

    fn open(&mut self, name: &str) -> Result<(), String> {
        self.skip_ws();
        match self.next() {
            Some(Token::Open(n)) if n == name => Ok(()),
            other => Err(format!("expected <{name}>, found {}", describe(other.as_ref()))),
        }
    }

    fn close(&mut self, name: &str) -> Result<(), String> {
        self.skip_ws();
        match self.next() {
            Some(Token::Close(n)) if n == name => Ok(()),
            other => Err(format!("expected </{name}>, found {}", describe(other.as_ref()))),
        }
    }

    /// Text content up to the closing tag; empty when the element has none
    fn text_until(&mut self, name: &str) -> Result<String, String> {
        let text = match self.peek() {
            Some(Token::Text(t)) => {
                let t = t.clone();
                self.pos += 1;
                t
            }
            _ => String::new(),
        };
        self.close(name)?;
        Ok(text)
    }

    fn at_open(&mut self, name: &str) -> bool {
        self.skip_ws();
        matches!(self.peek(), Some(Token::Open(n)) if n == name)
    }

    fn response(&mut self) -> Result<Response, String> {
        self.open("methodResponse")?;
        self.skip_ws();
        let response = match self.next() {
            Some(Token::Open(n)) if n == "params" => {
                self.open("param")?;
                let value = self.value()?;
                self.close("param")?;
                self.close("params")?;
                Response::Success(value)
            }
            Some(Token::Empty(n)) if n == "params" => Response::Success(Value::Nil),
            Some(Token::Open(n)) if n == "fault" => {
                let value = self.value()?;
                self.close("fault")?;
                fault_from(&value)?
            }
            other => {
                return Err(format!(
                    "expected <params> or <fault>, found {}",
                    describe(other.as_ref())
                ));
            }
        };
        self.close("methodResponse")?;
        Ok(response)
    }

    fn value(&mut self) -> Result<Value, String> {
        self.skip_ws();
        match self.next() {
            Some(Token::Open(n)) if n == "value" => {}
            Some(Token::Empty(n)) if n == "value" => return Ok(Value::String(String::new())),
            other => return Err(format!("expected <value>, found {}", describe(other.as_ref()))),
        }

        // Untyped content is a string, whitespace included
        let untyped = match self.peek() {
            Some(Token::Text(t)) => Some(t.clone()),
            Some(Token::Close(n)) if n == "value" => Some(String::new()),
            _ => None,
        };
        if let Some(text) = untyped {
            let save = self.pos;
            if !text.is_empty() {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(Token::Close(n)) if n == "value") {
                self.pos += 1;
                return Ok(Value::String(text));
            }
            self.pos = save;
        }

        self.skip_ws();
        let value = match self.next() {
            Some(Token::Empty(kind)) => empty_typed(&kind)?,
            Some(Token::Open(kind)) => self.typed(&kind)?,
            other => return Err(format!("expected a typed value, found {}", describe(other.as_ref()))),
        };
        self.close("value")?;
        Ok(value)
    }

    fn typed(&mut self, kind: &str) -> Result<Value, String> {
        match kind {
            "string" => Ok(Value::String(self.text_until(kind)?)),
            "int" | "i4" | "i8" => {
                let text = self.text_until(kind)?;
                text.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| format!("invalid <{kind}> '{text}': {e}"))
            }
            "boolean" => match self.text_until(kind)?.trim() {
                "1" => Ok(Value::Boolean(true)),
                "0" => Ok(Value::Boolean(false)),
                other => Err(format!("invalid <boolean> '{other}'")),
            },
            "double" => {
                let text = self.text_until(kind)?;
                text.trim()
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|e| format!("invalid <double> '{text}': {e}"))
            }
            "dateTime.iso8601" => Ok(Value::DateTime(self.text_until(kind)?.trim().to_string())),
            "base64" => Ok(Value::Base64(self.text_until(kind)?.trim().to_string())),
            "nil" => {
                self.close(kind)?;
                Ok(Value::Nil)
            }
            "array" => self.array(),
            "struct" => self.structure(),
            other => Err(format!("unsupported value type <{other}>")),
        }
    }

    fn array(&mut self) -> Result<Value, String> {
        self.skip_ws();
        let mut items = Vec::new();
        match self.next() {
            Some(Token::Empty(n)) if n == "data" => {}
            Some(Token::Open(n)) if n == "data" => {
                while self.at_value() {
                    items.push(self.value()?);
                }
                self.close("data")?;
            }
            other => return Err(format!("expected <data>, found {}", describe(other.as_ref()))),
        }
        self.close("array")?;
        Ok(Value::Array(items))
    }

    fn at_value(&mut self) -> bool {
        self.skip_ws();
        matches!(self.peek(), Some(Token::Open(n) | Token::Empty(n)) if n == "value")
    }

    fn structure(&mut self) -> Result<Value, String> {
        let mut members = BTreeMap::new();
        while self.at_open("member") {
            self.open("member")?;
            self.open("name")?;
            let name = self.text_until("name")?;
            let value = self.value()?;
            self.close("member")?;
            members.insert(name, value);
        }
        self.close("struct")?;
        Ok(Value::Struct(members))
    }
}

fn empty_typed(kind: &str) -> Result<Value, String> {
    match kind {
        "string" => Ok(Value::String(String::new())),
        "nil" => Ok(Value::Nil),
        "array" => Ok(Value::Array(Vec::new())),
        "struct" => Ok(Value::Struct(BTreeMap::new())),
        other => Err(format!("empty <{other}/> has no value")),
    }
}

fn fault_from(value: &Value) -> Result<Response, String> {
    let members = value
        .as_struct()
        .ok_or_else(|| "fault value is not a struct".to_string())?;
    let code = members
        .get("faultCode")
        .and_then(Value::as_i64)
        .ok_or_else(|| "fault without integer faultCode".to_string())?;
    let message = members
        .get("faultString")
        .and_then(Value::to_text)
        .unwrap_or_default();
    Ok(Response::Fault { code, message })
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(Token::Open(n)) => format!("<{n}>"),
        Some(Token::Close(n)) => format!("</{n}>"),
        Some(Token::Empty(n)) => format!("<{n}/>"),
        Some(Token::Text(t)) => format!("text '{}'", t.trim()),
        None => "end of document".to_string(),
    }
}
