//! The normalized `compilations` record handed to the loader.

use crate::model::Compiler;
use compdb_kernel::{Bytecodes, IdObject, Sources};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized compilation record.
///
/// `processed_sources` and `sources` are positional: slot `i` belongs to
/// `sourceIndexes[i]` of the originating entry. A `None` slot means no
/// source matched that path; it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationInput {
    pub compiler: Compiler,
    pub processed_sources: Vec<Option<ProcessedSourceInput>>,
    pub sources: Vec<Option<IdObject<Sources>>>,
    pub source_maps: Vec<SourceMapInput>,
    pub immutable_references: Vec<ImmutableReferenceInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedSourceInput {
    pub source: IdObject<Sources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<AstInput>,
    pub language: String,
}

/// A source AST, stringified for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstInput {
    pub json: String,
}

impl AstInput {
    /// Stringify a structured AST, keeping the document's key order.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) mean there is no AST.
    pub fn from_value(ast: &Value) -> Option<Self> {
        let absent = match ast {
            Value::Null => true,
            Value::Bool(flag) => !flag,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        };
        (!absent).then(|| Self {
            json: ast.to_string(),
        })
    }

    /// Parse the stored AST back into a structured value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapInput {
    pub bytecode: IdObject<Bytecodes>,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmutableReferenceInput {
    pub ast_node: String,
    pub bytecode: IdObject<Bytecodes>,
    pub length: u64,
    pub offsets: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ast_input_stringifies_and_parses_back() {
        let ast = json!({"nodeType": "SourceUnit", "nodes": [1, 2]});
        let input = AstInput::from_value(&ast).expect("object AST is present");
        assert_eq!(input.to_value().expect("stored AST parses"), ast);
    }

    #[test]
    fn falsy_ast_has_no_input() {
        for ast in [Value::Null, json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(AstInput::from_value(&ast), None, "{ast} should count as absent");
        }
    }

    #[test]
    fn empty_containers_are_still_an_ast() {
        assert_eq!(
            AstInput::from_value(&json!({})).map(|input| input.json),
            Some("{}".to_string())
        );
        assert_eq!(
            AstInput::from_value(&json!([])).map(|input| input.json),
            Some("[]".to_string())
        );
    }

    #[test]
    fn stringified_ast_keeps_document_key_order() {
        let ast: Value = serde_json::from_str(
            r#"{"nodeType":"SourceUnit","id":1,"absolutePath":"A.sol","nodes":[{"src":"0:1:0","id":2}]}"#,
        )
        .expect("ast should parse");

        let input = AstInput::from_value(&ast).expect("object AST is present");

        assert_eq!(
            input.json,
            r#"{"nodeType":"SourceUnit","id":1,"absolutePath":"A.sol","nodes":[{"src":"0:1:0","id":2}]}"#
        );
    }

    #[test]
    fn gaps_serialize_as_null() {
        let input = CompilationInput {
            compiler: Compiler {
                name: "solc".into(),
                version: "0.8.0".into(),
                extra: Default::default(),
            },
            processed_sources: vec![None],
            sources: vec![None],
            source_maps: vec![],
            immutable_references: vec![],
        };
        let value = serde_json::to_value(&input).expect("serialize");
        assert_eq!(value["sources"], json!([null]));
        assert_eq!(value["processedSources"], json!([null]));
    }
}
