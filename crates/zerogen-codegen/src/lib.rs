//! Materializes a resolved schema into generated module text.

mod serializer;
use serializer::Serializer;

use zerogen_core::schema::zero;
use zerogen_core::Result;

/// Output flavor of the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// A TypeScript module: a structural `Schema` type alias plus the
    /// serialized schema constant, behind a do-not-edit banner.
    #[default]
    TypeScript,

    /// The serialized schema alone, for consumers that load it dynamically.
    Json,
}

/// Render the generated module. Deterministic: identical schemas yield
/// byte-identical output.
pub fn generate_module(schema: &zero::Schema, format: Format) -> Result<String> {
    let json = serde_json::to_string_pretty(schema)
        .map_err(|err| zerogen_core::err!("failed to serialize schema: {err}"))?;

    match format {
        Format::Json => Ok(format!("{json}\n")),
        Format::TypeScript => {
            let type_alias = Serializer::new().type_alias(schema);
            Ok(format!(
                "{BANNER}\nexport type Schema = {type_alias};\n\nexport const schema = {json} as Schema;\n"
            ))
        }
    }
}

const BANNER: &str = "\
/* eslint-disable */
/* tslint:disable */
/*
 * -------------------------------------------------------------
 * ## This file was automatically generated by zerogen.      ##
 * ## Any changes you make to this file will be overwritten. ##
 * -------------------------------------------------------------
 */
";
