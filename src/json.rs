//! JSON transforms: validation, reformatting, key sorting, path queries,
//! schema checks, and conversion to CSV, SQL, XML, YAML, and TypeScript.
//!
//! The value tree is [`serde_json::Value`] with order-preserving object maps,
//! so transforms that echo keys back (XML, TypeScript, CSV headers) keep the
//! input's key order deterministically.
//!
//! Every function here takes raw JSON text and parses it itself, returning
//! [`Error::InvalidJson`](crate::Error) with line/column context on bad
//! input. There is no separate "validate first, then trust" two-step; see
//! [`validate`] when only the parse matters.
//!
//! The tabular targets (CSV, SQL) require the top level to be an array of
//! objects. Nested values are flattened into dotted column names
//! (`address.city`); anything else at the top level is a hard
//! [`Error::UnsupportedShape`](crate::Error) with a message meant for direct
//! display.
//!
//! ## Examples
//!
//! ```rust
//! use omniconv::json::{to_csv, CsvOptions};
//!
//! let csv = to_csv(r#"[{"a":1,"b":2}]"#, &CsvOptions::new()).unwrap();
//! assert_eq!(csv, "a,b\n1,2");
//! ```

use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use quick_xml::escape::escape;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;

/// Parses JSON text, reporting position on failure.
///
/// This is the shared syntax check the other transforms build on; call it
/// directly when you only need to know whether input parses.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::validate;
///
/// assert!(validate(r#"{"ok": true}"#).is_ok());
/// assert!(validate("{oops").is_err());
/// ```
pub fn validate(input: &str) -> Result<Value> {
    Ok(serde_json::from_str(input)?)
}

/// Reprints JSON with all insignificant whitespace removed.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::minify;
///
/// assert_eq!(minify("{ \"a\" : [ 1 , 2 ] }").unwrap(), r#"{"a":[1,2]}"#);
/// ```
pub fn minify(input: &str) -> Result<String> {
    let value = validate(input)?;
    serde_json::to_string(&value).map_err(|e| Error::output("json", e))
}

/// Pretty-prints JSON with the given indent width.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::format;
///
/// assert_eq!(format(r#"{"a":1}"#, 2).unwrap(), "{\n  \"a\": 1\n}");
/// ```
pub fn format(input: &str, indent: usize) -> Result<String> {
    let value = validate(input)?;
    let pad = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| Error::output("json", e))?;
    String::from_utf8(buf).map_err(|e| Error::output("json", e))
}

/// Recursively sorts object keys lexicographically at every level.
///
/// Array order and leaf values are preserved verbatim, so the value content
/// round-trips; only key order changes. Idempotent.
#[must_use]
pub fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}

/// Parses JSON text and reprints it pretty with keys sorted at every level.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::sort_keys;
///
/// let out = sort_keys(r#"{"b":1,"a":{"z":0,"y":0}}"#).unwrap();
/// assert_eq!(out, "{\n  \"a\": {\n    \"y\": 0,\n    \"z\": 0\n  },\n  \"b\": 1\n}");
/// ```
pub fn sort_keys(input: &str) -> Result<String> {
    let sorted = sort_value(&validate(input)?);
    serde_json::to_string_pretty(&sorted).map_err(|e| Error::output("json", e))
}

// ---------------------------------------------------------------------------
// Tabular targets: CSV and SQL
// ---------------------------------------------------------------------------

/// Options for [`to_csv`].
#[derive(Clone, Debug)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            header: true,
        }
    }
}

impl CsvOptions {
    /// Default options: comma delimiter, header row included.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter byte (e.g. `b';'` or `b'\t'`).
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Includes or omits the header row.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Requires the top level to be an array of objects; flattens each and
/// returns the rows plus the union of column names in first-seen order.
fn tabular_rows(input: &str, target: &str) -> Result<(IndexSet<String>, Vec<IndexMap<String, Value>>)> {
    let items = match validate(input)? {
        Value::Array(items) => items,
        other => {
            return Err(Error::unsupported_shape(format!(
                "JSON to {target} needs a top-level array of objects, found {}",
                type_name(&other)
            )));
        }
    };

    let mut columns = IndexSet::new();
    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let map = match item {
            Value::Object(map) => map,
            other => {
                return Err(Error::unsupported_shape(format!(
                    "JSON to {target} needs every array element to be an object, \
                     found {} at index {i}",
                    type_name(&other)
                )));
            }
        };
        let mut row = IndexMap::new();
        for (key, value) in map {
            flatten_into(&key, value, &mut row);
        }
        for key in row.keys() {
            columns.insert(key.clone());
        }
        rows.push(row);
    }
    Ok((columns, rows))
}

fn flatten_into(prefix: &str, value: Value, out: &mut IndexMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(&format!("{prefix}.{key}"), value, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other);
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converts a JSON array of objects to CSV.
///
/// The header row is the union of (flattened) keys in first-seen order; a
/// row missing a column gets an empty field. Quoting and escaping follow
/// RFC 4180 via the `csv` writer. No trailing newline.
///
/// # Errors
///
/// [`Error::UnsupportedShape`](crate::Error) unless the top level is an
/// array whose every element is an object.
pub fn to_csv(input: &str, options: &CsvOptions) -> Result<String> {
    let (columns, rows) = tabular_rows(input, "CSV")?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    if options.header {
        writer
            .write_record(&columns)
            .map_err(|e| Error::output("csv", e))?;
    }
    for row in &rows {
        let record: Vec<String> = columns
            .iter()
            .map(|col| row.get(col).map(scalar_text).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| Error::output("csv", e))?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::output("csv", e))?;
    let mut text = String::from_utf8(bytes).map_err(|e| Error::output("csv", e))?;
    text.truncate(text.trim_end_matches(|c| c == '\r' || c == '\n').len());
    Ok(text)
}

/// Options for [`to_sql`].
#[derive(Clone, Debug)]
pub struct SqlOptions {
    pub table: String,
}

impl Default for SqlOptions {
    fn default() -> Self {
        SqlOptions {
            table: "data".to_string(),
        }
    }
}

impl SqlOptions {
    /// Default options: table name `data`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target table name.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        // Arrays that survived flattening are stored as JSON text
        other => format!("'{}'", other.to_string().replace('\'', "''")),
    }
}

/// Converts a JSON array of objects to SQL `INSERT` statements, one per row.
///
/// Column set and shape requirements are the same as [`to_csv`]. String
/// values are single-quoted with embedded quotes doubled; a row missing a
/// column inserts `NULL`.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::{to_sql, SqlOptions};
///
/// let sql = to_sql(r#"[{"id":1,"name":"O'Brien"}]"#, &SqlOptions::new().with_table("users"))
///     .unwrap();
/// assert_eq!(sql, "INSERT INTO users (id, name) VALUES (1, 'O''Brien');");
/// ```
pub fn to_sql(input: &str, options: &SqlOptions) -> Result<String> {
    if options.table.is_empty() {
        return Err(Error::output("sql", "table name must not be empty"));
    }
    let (columns, rows) = tabular_rows(input, "SQL")?;
    let column_list = columns.iter().cloned().collect::<Vec<_>>().join(", ");

    let mut statements = Vec::with_capacity(rows.len());
    for row in &rows {
        let values: Vec<String> = columns
            .iter()
            .map(|col| row.get(col).map(sql_literal).unwrap_or_else(|| "NULL".to_string()))
            .collect();
        statements.push(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            options.table,
            column_list,
            values.join(", ")
        ));
    }
    Ok(statements.join("\n"))
}

// ---------------------------------------------------------------------------
// Document targets: XML, YAML, TypeScript
// ---------------------------------------------------------------------------

/// Options for [`to_xml`].
#[derive(Clone, Debug)]
pub struct XmlOptions {
    pub root: String,
    pub indent: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            root: "root".to_string(),
            indent: 2,
        }
    }
}

impl XmlOptions {
    /// Default options: `root` element, 2-space indent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document root element name.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the indent width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// JSON keys are not always valid XML names; anything unusable becomes `_`.
fn xml_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '.')) {
        name.insert(0, '_');
    }
    name
}

fn write_xml(out: &mut String, name: &str, value: &Value, depth: usize, indent: usize) {
    let pad = " ".repeat(depth * indent);
    match value {
        Value::Array(items) => {
            let _ = writeln!(out, "{pad}<{name}>");
            for item in items {
                write_xml(out, "item", item, depth + 1, indent);
            }
            let _ = writeln!(out, "{pad}</{name}>");
        }
        Value::Object(map) => {
            let _ = writeln!(out, "{pad}<{name}>");
            for (key, child) in map {
                write_xml(out, &xml_name(key), child, depth + 1, indent);
            }
            let _ = writeln!(out, "{pad}</{name}>");
        }
        Value::Null => {
            let _ = writeln!(out, "{pad}<{name}/>");
        }
        scalar => {
            let text = scalar_text(scalar);
            let _ = writeln!(out, "{pad}<{name}>{}</{name}>", escape(text.as_str()));
        }
    }
}

/// Converts JSON to an XML document.
///
/// Object keys become elements (sanitized to valid XML names), array
/// elements repeat as `<item>`, `null` becomes a self-closing element, and
/// text content is XML-escaped.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::{to_xml, XmlOptions};
///
/// let xml = to_xml(r#"{"name":"a<b"}"#, &XmlOptions::new()).unwrap();
/// assert!(xml.contains("<name>a&lt;b</name>"));
/// ```
pub fn to_xml(input: &str, options: &XmlOptions) -> Result<String> {
    let value = validate(input)?;
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_xml(
        &mut out,
        &xml_name(&options.root),
        &value,
        0,
        options.indent,
    );
    out.truncate(out.trim_end().len());
    Ok(out)
}

/// Converts JSON to YAML.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::to_yaml;
///
/// let yaml = to_yaml(r#"{"name":"Alice","tags":["a","b"]}"#).unwrap();
/// assert_eq!(yaml, "name: Alice\ntags:\n- a\n- b\n");
/// ```
pub fn to_yaml(input: &str) -> Result<String> {
    let value = validate(input)?;
    serde_yaml::to_string(&value).map_err(|e| Error::output("yaml", e))
}

/// Options for [`to_typescript`].
#[derive(Clone, Debug)]
pub struct TsOptions {
    pub root_name: String,
}

impl Default for TsOptions {
    fn default() -> Self {
        TsOptions {
            root_name: "Root".to_string(),
        }
    }
}

impl TsOptions {
    /// Default options: root interface named `Root`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root interface name.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }
}

struct TsBuilder {
    interfaces: Vec<(String, IndexMap<String, TsField>)>,
    used_names: IndexSet<String>,
}

struct TsField {
    ty: String,
    optional: bool,
}

impl TsBuilder {
    fn new() -> Self {
        TsBuilder {
            interfaces: Vec::new(),
            used_names: IndexSet::new(),
        }
    }

    fn unique_name(&mut self, hint: &str) -> String {
        let base = crate::text::convert_case(hint, crate::text::CaseMode::Pascal);
        let base = if base.is_empty() { "Item".to_string() } else { base };
        let mut name = base.clone();
        let mut n = 2;
        while !self.used_names.insert(name.clone()) {
            name = format!("{base}{n}");
            n += 1;
        }
        name
    }

    /// Returns the TypeScript type expression for a value, registering
    /// nested interfaces along the way.
    fn type_of(&mut self, value: &Value, hint: &str) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Object(_) => {
                let name = self.unique_name(hint);
                let fields = self.object_fields(std::slice::from_ref(value), hint);
                self.interfaces.push((name.clone(), fields));
                name
            }
            Value::Array(items) => {
                if items.is_empty() {
                    return "unknown[]".to_string();
                }
                if items.iter().all(Value::is_object) {
                    let name = self.unique_name(hint);
                    let fields = self.object_fields(items, hint);
                    self.interfaces.push((name.clone(), fields));
                    return format!("{name}[]");
                }
                let mut types = IndexSet::new();
                for item in items {
                    types.insert(self.type_of(item, hint));
                }
                if types.len() == 1 {
                    format!("{}[]", types[0])
                } else {
                    format!("({})[]", types.iter().cloned().collect::<Vec<_>>().join(" | "))
                }
            }
        }
    }

    /// Merges one or more objects into a field map: field types union
    /// across the samples, fields absent from some samples become optional.
    fn object_fields(&mut self, samples: &[Value], hint: &str) -> IndexMap<String, TsField> {
        let maps: Vec<_> = samples.iter().filter_map(Value::as_object).collect();
        let mut fields: IndexMap<String, (IndexSet<String>, usize)> = IndexMap::new();
        for map in &maps {
            for (key, value) in map.iter() {
                let ty = self.type_of(value, key);
                let entry = fields.entry(key.clone()).or_default();
                entry.0.insert(ty);
                entry.1 += 1;
            }
        }
        let total = maps.len();
        fields
            .into_iter()
            .map(|(key, (types, seen))| {
                let ty = types.iter().cloned().collect::<Vec<_>>().join(" | ");
                (key, TsField { ty, optional: seen < total })
            })
            .collect()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (name, fields) in &self.interfaces {
            let _ = writeln!(out, "interface {name} {{");
            for (key, field) in fields {
                let quoted;
                let key = if key.chars().enumerate().all(|(i, c)| {
                    c == '_' || c == '$' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())
                }) && !key.is_empty()
                {
                    key.as_str()
                } else {
                    quoted = format!("{key:?}");
                    quoted.as_str()
                };
                let marker = if field.optional { "?" } else { "" };
                let _ = writeln!(out, "  {key}{marker}: {};", field.ty);
            }
            out.push_str("}\n\n");
        }
        out.truncate(out.trim_end().len());
        out
    }
}

/// Infers TypeScript interface declarations from a JSON value.
///
/// Objects become interfaces (nested ones get names derived from their
/// keys), homogeneous object arrays merge into one interface with optional
/// fields where keys are missing from some elements, and mixed arrays
/// produce union element types.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::{to_typescript, TsOptions};
///
/// let ts = to_typescript(r#"{"id":1,"name":"x"}"#, &TsOptions::new()).unwrap();
/// assert_eq!(ts, "interface Root {\n  id: number;\n  name: string;\n}");
/// ```
pub fn to_typescript(input: &str, options: &TsOptions) -> Result<String> {
    let value = validate(input)?;
    let mut builder = TsBuilder::new();
    match &value {
        Value::Object(_) | Value::Array(_) => {
            builder.type_of(&value, &options.root_name);
        }
        scalar => {
            return Err(Error::unsupported_shape(format!(
                "JSON to TypeScript needs an object or array at the top level, found {}",
                type_name(scalar)
            )));
        }
    }
    Ok(builder.render())
}

// ---------------------------------------------------------------------------
// Path queries and schema checks
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
enum PathStep {
    Key(String),
    Index(usize),
    Wildcard,
}

/// Supported subset: `$`, `.prop`, `['prop']`, `["prop"]`, `[0]`, `[*]`,
/// `.*`. Deliberately not full JSONPath; anything else errors.
fn parse_path(path: &str) -> Result<Vec<PathStep>> {
    let mut chars = path.chars().peekable();
    if chars.next() != Some('$') {
        return Err(Error::invalid_path(path, "path must start with $"));
    }

    let mut steps = Vec::new();
    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if chars.peek() == Some(&'.') {
                    return Err(Error::invalid_path(path, "recursive descent (..) is not supported"));
                }
                if chars.peek() == Some(&'*') {
                    chars.next();
                    steps.push(PathStep::Wildcard);
                    continue;
                }
                let mut key = String::new();
                while let Some(&next) = chars.peek() {
                    if next == '.' || next == '[' {
                        break;
                    }
                    key.push(next);
                    chars.next();
                }
                if key.is_empty() {
                    return Err(Error::invalid_path(path, "empty property name after '.'"));
                }
                steps.push(PathStep::Key(key));
            }
            '[' => {
                let mut inner = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    if next == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(next);
                }
                if !closed {
                    return Err(Error::invalid_path(path, "unterminated '['"));
                }
                if inner == "*" {
                    steps.push(PathStep::Wildcard);
                } else if let Some(quoted) = inner
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                    .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
                {
                    steps.push(PathStep::Key(quoted.to_string()));
                } else if let Ok(index) = inner.parse::<usize>() {
                    steps.push(PathStep::Index(index));
                } else {
                    return Err(Error::invalid_path(
                        path,
                        "brackets take an index, a quoted name, or *",
                    ));
                }
            }
            other => {
                return Err(Error::invalid_path(
                    path,
                    &format!("unexpected {other:?}; expected '.' or '['"),
                ));
            }
        }
    }
    Ok(steps)
}

/// Evaluates a JSONPath-subset expression against JSON text.
///
/// Supported syntax is exactly: root `$`, dot properties (`$.a.b`), quoted
/// bracket properties (`$['a b']`), numeric indexes (`$.items[0]`), and the
/// wildcard `*` (dot or bracket form) over arrays and object values.
/// Recursive descent, slices, and filters are not supported and error out.
///
/// Steps that do not apply (a property on a non-object, an index past the
/// end) drop candidates silently, matching JSONPath convention; the result
/// is the possibly empty list of matches.
///
/// # Examples
///
/// ```rust
/// use omniconv::json::path_query;
/// use serde_json::json;
///
/// let doc = r#"{"users":[{"name":"ann"},{"name":"ben"}]}"#;
/// let names = path_query(doc, "$.users[*].name").unwrap();
/// assert_eq!(names, vec![json!("ann"), json!("ben")]);
/// ```
pub fn path_query(input: &str, path: &str) -> Result<Vec<Value>> {
    let value = validate(input)?;
    let steps = parse_path(path)?;

    let mut current = vec![&value];
    for step in &steps {
        let mut next = Vec::new();
        for node in current {
            match step {
                PathStep::Key(key) => {
                    if let Some(child) = node.as_object().and_then(|m| m.get(key)) {
                        next.push(child);
                    }
                }
                PathStep::Index(i) => {
                    if let Some(child) = node.as_array().and_then(|a| a.get(*i)) {
                        next.push(child);
                    }
                }
                PathStep::Wildcard => match node {
                    Value::Array(items) => next.extend(items.iter()),
                    Value::Object(map) => next.extend(map.values()),
                    _ => {}
                },
            }
        }
        current = next;
    }
    Ok(current.into_iter().cloned().collect())
}

/// Checks JSON against a structural schema subset.
///
/// Supported keywords, applied recursively: `type` (string or array of
/// strings over `object`, `array`, `string`, `number`, `integer`,
/// `boolean`, `null`), `properties`, `required`, and `items`. Everything
/// else in the schema is ignored.
///
/// Returns the list of violations with `$`-rooted paths; an empty list
/// means the document conforms.
///
/// # Errors
///
/// [`Error::InvalidSchema`](crate::Error) if the schema itself is
/// malformed (non-object schema, `required` not an array of strings, an
/// unknown `type` name).
///
/// # Examples
///
/// ```rust
/// use omniconv::json::validate_schema;
///
/// let schema = r#"{"type":"object","required":["id"],"properties":{"id":{"type":"number"}}}"#;
/// assert!(validate_schema(r#"{"id":1}"#, schema).unwrap().is_empty());
///
/// let violations = validate_schema(r#"{"id":"x"}"#, schema).unwrap();
/// assert_eq!(violations, vec!["$.id: expected number, found string".to_string()]);
/// ```
pub fn validate_schema(input: &str, schema: &str) -> Result<Vec<String>> {
    let value = validate(input)?;
    let schema: Value =
        serde_json::from_str(schema).map_err(|e| Error::InvalidSchema(e.to_string()))?;
    let mut violations = Vec::new();
    check_schema(&value, &schema, "$", &mut violations)?;
    Ok(violations)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_matches(value: &Value, name: &str) -> Result<bool> {
    Ok(match name {
        "integer" => match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            _ => false,
        },
        "object" | "array" | "string" | "number" | "boolean" | "null" => json_type(value) == name,
        other => {
            return Err(Error::InvalidSchema(format!("unknown type {other:?}")));
        }
    })
}

fn check_schema(value: &Value, schema: &Value, path: &str, out: &mut Vec<String>) -> Result<()> {
    let Value::Object(schema) = schema else {
        return Err(Error::InvalidSchema(format!(
            "schema at {path} must be an object, found {}",
            json_type(schema)
        )));
    };

    if let Some(expected) = schema.get("type") {
        let names: Vec<&str> = match expected {
            Value::String(name) => vec![name.as_str()],
            Value::Array(names) => names
                .iter()
                .map(|n| {
                    n.as_str().ok_or_else(|| {
                        Error::InvalidSchema("\"type\" array entries must be strings".to_string())
                    })
                })
                .collect::<Result<_>>()?,
            _ => {
                return Err(Error::InvalidSchema(
                    "\"type\" must be a string or array of strings".to_string(),
                ));
            }
        };
        let mut matched = false;
        for name in &names {
            if type_matches(value, name)? {
                matched = true;
            }
        }
        if !matched {
            out.push(format!(
                "{path}: expected {}, found {}",
                names.join(" or "),
                json_type(value)
            ));
            // Type already wrong; deeper keywords would only repeat the news
            return Ok(());
        }
    }

    if let Some(required) = schema.get("required") {
        let Value::Array(names) = required else {
            return Err(Error::InvalidSchema(
                "\"required\" must be an array of strings".to_string(),
            ));
        };
        if let Value::Object(map) = value {
            for name in names {
                let Some(name) = name.as_str() else {
                    return Err(Error::InvalidSchema(
                        "\"required\" must be an array of strings".to_string(),
                    ));
                };
                if !map.contains_key(name) {
                    out.push(format!("{path}: missing required property {name:?}"));
                }
            }
        }
    }

    if let Some(properties) = schema.get("properties") {
        let Value::Object(properties) = properties else {
            return Err(Error::InvalidSchema(
                "\"properties\" must be an object".to_string(),
            ));
        };
        if let Value::Object(map) = value {
            for (name, subschema) in properties {
                if let Some(child) = map.get(name) {
                    check_schema(child, subschema, &format!("{path}.{name}"), out)?;
                }
            }
        }
    }

    if let Some(items) = schema.get("items") {
        if let Value::Array(elements) = value {
            for (i, element) in elements.iter().enumerate() {
                check_schema(element, items, &format!("{path}[{i}]"), out)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_reports_position() {
        let err = validate("{\n  \"a\": ,\n}").unwrap_err();
        match err {
            Error::InvalidJson { line, .. } => assert_eq!(line, 2),
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn test_minify_and_format() {
        let input = "{\n  \"a\": [1, 2],\n  \"b\": \"x\"\n}";
        assert_eq!(minify(input).unwrap(), r#"{"a":[1,2],"b":"x"}"#);
        assert_eq!(
            format(r#"{"a":[1]}"#, 4).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_sort_value_recursive_and_idempotent() {
        let input = json!({"b": {"d": 1, "c": 2}, "a": [{"z": 1, "y": 2}]});
        let sorted = sort_value(&input);
        let keys: Vec<&String> = sorted.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        let inner: Vec<&String> = sorted["b"].as_object().unwrap().keys().collect();
        assert_eq!(inner, ["c", "d"]);
        let in_array: Vec<&String> = sorted["a"][0].as_object().unwrap().keys().collect();
        assert_eq!(in_array, ["y", "z"]);

        assert_eq!(sort_value(&sorted), sorted);
        // Leaf values and array order survive
        assert_eq!(sorted["b"]["d"], json!(1));
    }

    #[test]
    fn test_csv_spec_example() {
        assert_eq!(to_csv(r#"[{"a":1,"b":2}]"#, &CsvOptions::new()).unwrap(), "a,b\n1,2");
    }

    #[test]
    fn test_csv_union_columns_and_quoting() {
        let input = r#"[{"a":"x,y","b":1},{"a":"plain","c":true}]"#;
        let csv = to_csv(input, &CsvOptions::new()).unwrap();
        assert_eq!(csv, "a,b,c\n\"x,y\",1,\nplain,,true");
    }

    #[test]
    fn test_csv_flattens_nested_objects() {
        let input = r#"[{"name":"ann","address":{"city":"Oslo","zip":"0150"}}]"#;
        let csv = to_csv(input, &CsvOptions::new()).unwrap();
        assert_eq!(csv, "name,address.city,address.zip\nann,Oslo,0150");
    }

    #[test]
    fn test_csv_options() {
        let input = r#"[{"a":1,"b":2}]"#;
        let csv = to_csv(input, &CsvOptions::new().with_delimiter(b';').with_header(false)).unwrap();
        assert_eq!(csv, "1;2");
    }

    #[test]
    fn test_csv_rejects_shapes() {
        let err = to_csv(r#"{"a":1}"#, &CsvOptions::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedShape(_)));
        assert!(err.to_string().contains("array of objects"));

        let err = to_csv(r#"[1,2]"#, &CsvOptions::new()).unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn test_sql_rows() {
        let input = r#"[{"id":1,"name":"ann"},{"id":2,"name":null}]"#;
        let sql = to_sql(input, &SqlOptions::new().with_table("users")).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (id, name) VALUES (1, 'ann');\n\
             INSERT INTO users (id, name) VALUES (2, NULL);"
        );
    }

    #[test]
    fn test_sql_escapes_quotes() {
        let sql = to_sql(r#"[{"n":"O'Brien"}]"#, &SqlOptions::new()).unwrap();
        assert!(sql.contains("'O''Brien'"));
    }

    #[test]
    fn test_xml_structure() {
        let xml = to_xml(
            r#"{"name":"ann","tags":["a","b"],"none":null}"#,
            &XmlOptions::new(),
        )
        .unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                        <root>\n  <name>ann</name>\n  <tags>\n    <item>a</item>\n    \
                        <item>b</item>\n  </tags>\n  <none/>\n</root>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_xml_escapes_and_sanitizes() {
        let xml = to_xml(r#"{"a b":"1<2&3"}"#, &XmlOptions::new()).unwrap();
        assert!(xml.contains("<a_b>1&lt;2&amp;3</a_b>"));

        let xml = to_xml(r#"{"2nd":1}"#, &XmlOptions::new()).unwrap();
        assert!(xml.contains("<_2nd>1</_2nd>"));
    }

    #[test]
    fn test_yaml() {
        let yaml = to_yaml(r#"{"a":1,"b":[true,null]}"#).unwrap();
        assert_eq!(yaml, "a: 1\nb:\n- true\n- null\n");
    }

    #[test]
    fn test_typescript_flat_object() {
        let ts = to_typescript(r#"{"id":1,"name":"x","ok":true}"#, &TsOptions::new()).unwrap();
        assert_eq!(
            ts,
            "interface Root {\n  id: number;\n  name: string;\n  ok: boolean;\n}"
        );
    }

    #[test]
    fn test_typescript_nested_and_arrays() {
        let input = r#"{"user":{"id":1},"tags":["a","b"],"mixed":[1,"x"]}"#;
        let ts = to_typescript(input, &TsOptions::new()).unwrap();
        assert!(ts.contains("interface User {\n  id: number;\n}"));
        assert!(ts.contains("user: User;"));
        assert!(ts.contains("tags: string[];"));
        assert!(ts.contains("mixed: (number | string)[];"));
    }

    #[test]
    fn test_typescript_object_array_optionals() {
        let input = r#"[{"id":1,"name":"a"},{"id":2}]"#;
        let ts = to_typescript(input, &TsOptions::new()).unwrap();
        assert!(ts.contains("id: number;"));
        assert!(ts.contains("name?: string;"));
        assert!(ts.starts_with("interface Root {"));
    }

    #[test]
    fn test_typescript_quotes_awkward_keys() {
        let ts = to_typescript(r#"{"my key":1}"#, &TsOptions::new()).unwrap();
        assert!(ts.contains("\"my key\": number;"));
    }

    #[test]
    fn test_typescript_rejects_scalars() {
        assert!(matches!(
            to_typescript("42", &TsOptions::new()).unwrap_err(),
            Error::UnsupportedShape(_)
        ));
    }

    #[test]
    fn test_path_query_subset() {
        let doc = r#"{"a":{"b":[{"c":1},{"c":2}]},"d":"x"}"#;
        assert_eq!(path_query(doc, "$").unwrap().len(), 1);
        assert_eq!(path_query(doc, "$.a.b[0].c").unwrap(), vec![json!(1)]);
        assert_eq!(path_query(doc, "$.a.b[*].c").unwrap(), vec![json!(1), json!(2)]);
        assert_eq!(path_query(doc, "$['d']").unwrap(), vec![json!("x")]);
        assert_eq!(path_query(doc, "$.*").unwrap().len(), 2);
    }

    #[test]
    fn test_path_query_misses_are_empty_not_errors() {
        let doc = r#"{"a":[1]}"#;
        assert!(path_query(doc, "$.missing").unwrap().is_empty());
        assert!(path_query(doc, "$.a[9]").unwrap().is_empty());
        assert!(path_query(doc, "$.a.b").unwrap().is_empty());
    }

    #[test]
    fn test_path_query_rejects_unsupported_syntax() {
        let doc = "{}";
        for bad in ["a.b", "$..x", "$.", "$[1:2]", "$[?(@.a)]", "$[", "$x"] {
            let err = path_query(doc, bad).unwrap_err();
            assert!(matches!(err, Error::InvalidPath { .. }), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_schema_subset() {
        let schema = r#"{
            "type": "object",
            "required": ["id", "tags"],
            "properties": {
                "id": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }"#;

        assert!(validate_schema(r#"{"id":1,"tags":["a"]}"#, schema).unwrap().is_empty());

        let violations = validate_schema(r#"{"id":1.5,"tags":["a",2]}"#, schema).unwrap();
        assert_eq!(
            violations,
            vec![
                "$.id: expected integer, found number".to_string(),
                "$.tags[1]: expected string, found number".to_string(),
            ]
        );

        let violations = validate_schema(r#"{"id":1}"#, schema).unwrap();
        assert_eq!(violations, vec!["$: missing required property \"tags\"".to_string()]);
    }

    #[test]
    fn test_schema_type_unions() {
        let schema = r#"{"type":["string","null"]}"#;
        assert!(validate_schema("null", schema).unwrap().is_empty());
        assert!(validate_schema(r#""x""#, schema).unwrap().is_empty());
        let violations = validate_schema("3", schema).unwrap();
        assert_eq!(violations, vec!["$: expected string or null, found number".to_string()]);
    }

    #[test]
    fn test_schema_rejects_malformed_schema() {
        assert!(matches!(
            validate_schema("1", r#"{"type":"gizmo"}"#).unwrap_err(),
            Error::InvalidSchema(_)
        ));
        assert!(matches!(
            validate_schema("1", "[]").unwrap_err(),
            Error::InvalidSchema(_)
        ));
        assert!(matches!(
            validate_schema("{}", r#"{"required":"id"}"#).unwrap_err(),
            Error::InvalidSchema(_)
        ));
    }
}
