//! Single-pass, line-oriented class diagram parser.

use stem_core::{FieldDeclaration, Schema};

use crate::error::DiagramError;

const COMMENT_MARKER: &str = "%%";
const LINE_COMMENT: &str = "//";
const ARRAY_MARKER: &str = "[]";
const VISIBILITY_MARKERS: [char; 4] = ['+', '-', '#', '~'];

/// Where the scanner currently is.
#[derive(Debug)]
enum State {
    Outside,
    /// Saw `class Name` without `{`; the body may open on a later line.
    Header(String),
    /// Inside a class body. `None` means the header named an invalid
    /// identifier and the body is consumed without producing fields.
    Body(Option<String>),
}

/// Parse diagram text into a schema.
///
/// Never fails: malformed lines are skipped and entities without fields are
/// dropped. Use [`parse_schema`] when an empty result should be an error.
#[must_use]
pub fn parse_diagram(text: &str) -> Schema {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut schema = Schema::default();
    let mut state = State::Outside;

    for raw_line in normalized.lines() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() || line.starts_with(LINE_COMMENT) {
            continue;
        }
        state = step(state, line, &mut schema);
    }

    if let State::Body(Some(name)) = &state {
        tracing::warn!(entity = %name, "class block is not closed before end of diagram");
    }

    schema.retain_populated();
    schema
}

/// Parse diagram text, rejecting a diagram that yields no entities.
///
/// # Errors
///
/// Returns [`DiagramError::EmptySchema`] if no entity has at least one field.
pub fn parse_schema(text: &str) -> Result<Schema, DiagramError> {
    let schema = parse_diagram(text);
    if schema.is_empty() {
        return Err(DiagramError::EmptySchema { path: None });
    }
    Ok(schema)
}

fn step(state: State, line: &str, schema: &mut Schema) -> State {
    match state {
        State::Outside => outside(line, schema),
        State::Header(name) => match line.strip_prefix('{') {
            Some(rest) => open_body(&name, rest, schema),
            None => outside(line, schema),
        },
        State::Body(entity) => body(entity, line, schema),
    }
}

fn outside(line: &str, schema: &mut Schema) -> State {
    let Some(header) = class_header(line) else {
        return State::Outside;
    };
    match header.split_once('{') {
        Some((name, rest)) => open_body(name.trim(), rest, schema),
        None => State::Header(header.trim().to_string()),
    }
}

/// `class Name ...` → `Name ...`
fn class_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("class")?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

fn open_body(name: &str, rest: &str, schema: &mut Schema) -> State {
    let entity = match schema.entity_or_insert(name) {
        Ok(_) => Some(name.to_string()),
        Err(error) => {
            tracing::warn!(%error, "skipping class block");
            None
        }
    };
    let rest = rest.trim();
    if rest.is_empty() {
        State::Body(entity)
    } else {
        body(entity, rest, schema)
    }
}

fn body(entity: Option<String>, line: &str, schema: &mut Schema) -> State {
    let (content, closed) = match line.split_once('}') {
        Some((content, _)) => (content.trim(), true),
        None => (line, false),
    };

    if let Some(name) = &entity {
        if let Some(field) = parse_field(content) {
            push_field(schema, name, field);
        }
    }

    if closed {
        State::Outside
    } else {
        State::Body(entity)
    }
}

fn push_field(schema: &mut Schema, entity: &str, field: FieldDeclaration) {
    let result = schema
        .entity_or_insert(entity)
        .and_then(|e| e.push_field(field));
    if let Err(error) = result {
        tracing::warn!(%error, "skipping field declaration");
    }
}

/// `<marker><name>: <type>[[]]` → field declaration.
///
/// Returns `None` for lines without a `:` separator, without a name or
/// without a type.
fn parse_field(line: &str) -> Option<FieldDeclaration> {
    let (name, declared) = line.split_once(':')?;
    let name = name
        .trim()
        .trim_start_matches(VISIBILITY_MARKERS)
        .trim_start();
    if name.is_empty() {
        return None;
    }

    let declared = declared.trim();
    let (declared, is_array) = match declared.strip_suffix(ARRAY_MARKER) {
        Some(base) => (base.trim_end(), true),
        None => (declared, false),
    };
    if declared.is_empty() {
        return None;
    }

    Some(FieldDeclaration::new(name, declared, is_array))
}

fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER).map_or(line, |(code, _)| code)
}
