use zerogen_core::schema::zero;

/// Serialize a resolved schema into a precise structural type alias: every
/// column kind, key and destination appears as a literal type, so the
/// generated constant type-checks against it exactly.
#[derive(Debug, Default)]
pub(crate) struct Serializer {}

struct Formatter<'a> {
    /// Where to write the serialized type text
    dst: &'a mut String,

    /// Current nesting depth, used for indentation
    depth: usize,
}

impl Serializer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn type_alias(&self, schema: &zero::Schema) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            depth: 0,
        };
        fmt.schema(schema);

        ret
    }
}

impl Formatter<'_> {
    fn schema(&mut self, schema: &zero::Schema) {
        self.open();
        self.line(&format!("readonly version: {};", schema.version));
        self.keyed_object("tables", |fmt| {
            for table in schema.tables() {
                fmt.keyed_object(&table.table_name, |fmt| fmt.table(table));
            }
        });
        self.close();
    }

    fn table(&mut self, table: &zero::TableSpec) {
        self.line(&format!(
            "readonly tableName: {};",
            quote(&table.table_name)
        ));
        self.keyed_object("columns", |fmt| {
            for (name, column) in &table.columns {
                fmt.keyed_object(name, |fmt| fmt.column(column));
            }
        });
        self.line(&format!(
            "readonly primaryKey: readonly [{}];",
            table
                .primary_key
                .iter()
                .map(|name| quote(name))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        self.keyed_object("relationships", |fmt| {
            for (name, relationship) in &table.relationships {
                fmt.relationship(name, relationship);
            }
        });
    }

    fn column(&mut self, column: &zero::ColumnSpec) {
        self.line(&format!("readonly type: {};", quote(column.kind.as_str())));
        self.line(&format!("readonly optional: {};", column.optional));
        match &column.custom_type {
            Some(custom) => self.line(&format!("readonly customType: {};", quote(custom))),
            None => self.line("readonly customType: null;"),
        }
    }

    fn relationship(&mut self, name: &str, relationship: &zero::Relationship) {
        self.line(&format!("readonly {}: readonly [", key(name)));
        self.depth += 1;
        for hop in &relationship.hops {
            self.open();
            self.line(&format!(
                "readonly sourceField: readonly [{}];",
                quote_list(&hop.source_field)
            ));
            self.line(&format!(
                "readonly destField: readonly [{}];",
                quote_list(&hop.dest_field)
            ));
            self.line(&format!("readonly destSchema: {};", quote(&hop.dest_table)));
            self.line(&format!(
                "readonly cardinality: {};",
                quote(match hop.cardinality {
                    zero::Cardinality::One => "one",
                    zero::Cardinality::Many => "many",
                })
            ));
            self.depth -= 1;
            self.line("},");
        }
        self.depth -= 1;
        self.line("];");
    }

    /// `readonly <key>: { ... };`
    fn keyed_object(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        self.line(&format!("readonly {}: {{", key(name)));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line("};");
    }

    /// Opens an anonymous `{` block.
    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    /// Closes the block opened by [`Self::open`], without a trailing
    /// semicolon or newline so the caller controls what follows.
    fn close(&mut self) {
        self.depth -= 1;
        self.indent();
        self.dst.push('}');
    }

    fn line(&mut self, text: &str) {
        self.indent();
        self.dst.push_str(text);
        self.dst.push('\n');
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.dst.push_str("  ");
        }
    }
}

/// Quote a string as a literal type.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| quote(item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Object-type keys are emitted bare when they are valid identifiers,
/// quoted otherwise.
fn key(name: &str) -> String {
    let mut chars = name.chars();
    let ident = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if ident {
        name.to_string()
    } else {
        quote(name)
    }
}
