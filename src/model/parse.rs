//! tree-sitter front end for C# model sources.
//!
//! Produces a [`ParsedModel`]: the first type declaration of the file, the
//! first namespace around it, and its instance members in declaration order.
//! No classification happens here; that is the job of [`super::metadata`].

use tree_sitter::{Node, Parser};

use crate::error::{Result, ScaffoldError};

const TYPE_KINDS: &[&str] = &["class_declaration", "record_declaration", "struct_declaration"];
const NAMESPACE_KINDS: &[&str] = &["namespace_declaration", "file_scoped_namespace_declaration"];

/// A type declaration read from a model source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedModel {
    /// Type name
    pub name: String,
    /// Enclosing namespace
    pub namespace: String,
    /// Properties and fields in declaration order
    pub members: Vec<ParsedMember>,
}

/// A property or field of a parsed model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMember {
    /// Member name
    pub name: String,
    /// Type as written in the source, whitespace removed
    pub type_text: String,
    /// Attribute names attached to the member, e.g. `Key` or `Required`
    pub attributes: Vec<String>,
}

impl ParsedMember {
    /// True when the member carries the data-annotations key attribute
    pub fn is_key(&self) -> bool {
        self.attributes.iter().any(|attr| {
            matches!(
                attr.as_str(),
                "Key"
                    | "KeyAttribute"
                    | "System.ComponentModel.DataAnnotations.Key"
                    | "System.ComponentModel.DataAnnotations.KeyAttribute"
            )
        })
    }
}

/// Parse C# source text into a [`ParsedModel`]
///
/// # Errors
///
/// Returns [`ScaffoldError::MalformedInput`] if the grammar cannot be loaded,
/// or the source declares no type or no namespace.
pub fn parse_model(source: &str) -> Result<ParsedModel> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| ScaffoldError::MalformedInput(format!("C# grammar unavailable: {e}")))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScaffoldError::MalformedInput("the parser returned no syntax tree".into()))?;
    let bytes = source.as_bytes();
    let root = tree.root_node();

    let type_node = find_first(root, TYPE_KINDS)
        .ok_or_else(|| ScaffoldError::MalformedInput("no class declaration found".into()))?;
    let namespace_node = find_first(root, NAMESPACE_KINDS)
        .ok_or_else(|| ScaffoldError::MalformedInput("no namespace declaration found".into()))?;

    let name = field_text(type_node, "name", bytes)
        .ok_or_else(|| ScaffoldError::MalformedInput("the class declaration has no name".into()))?;
    let namespace = field_text(namespace_node, "name", bytes)
        .ok_or_else(|| ScaffoldError::MalformedInput("the namespace declaration has no name".into()))?;

    let mut members = Vec::new();
    let body = type_node.child_by_field_name("body").or_else(|| {
        let mut cursor = type_node.walk();
        let list = type_node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "declaration_list");
        list
    });
    if let Some(body) = body {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "property_declaration" => {
                    if let Some(member) = property_member(child, bytes) {
                        members.push(member);
                    }
                }
                "field_declaration" => members.extend(field_members(child, bytes)),
                _ => {}
            }
        }
    }

    Ok(ParsedModel {
        name,
        namespace,
        members,
    })
}

fn property_member(node: Node, source: &[u8]) -> Option<ParsedMember> {
    if !is_public_instance(node, source) {
        return None;
    }
    Some(ParsedMember {
        name: field_text(node, "name", source)?,
        type_text: field_text(node, "type", source)?,
        attributes: attributes(node, source),
    })
}

fn field_members(node: Node, source: &[u8]) -> Vec<ParsedMember> {
    if !is_public_instance(node, source) {
        return Vec::new();
    }
    let attributes = attributes(node, source);
    let mut cursor = node.walk();
    let Some(declaration) = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "variable_declaration")
    else {
        return Vec::new();
    };
    let Some(type_text) = field_text(declaration, "type", source) else {
        return Vec::new();
    };

    let mut cursor = declaration.walk();
    declaration
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "variable_declarator")
        .filter_map(|declarator| {
            let name = field_text(declarator, "name", source).or_else(|| {
                let mut inner = declarator.walk();
                let ident = declarator
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "identifier");
                ident.and_then(|n| node_text(n, source))
            })?;
            Some(ParsedMember {
                name,
                type_text: type_text.clone(),
                attributes: attributes.clone(),
            })
        })
        .collect()
}

/// Members without a `public` modifier are private by default in C#
fn is_public_instance(node: Node, source: &[u8]) -> bool {
    let mut cursor = node.walk();
    let modifiers: Vec<String> = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "modifier")
        .filter_map(|c| node_text(c, source))
        .collect();
    modifiers.iter().any(|m| m == "public")
        && !modifiers.iter().any(|m| matches!(m.as_str(), "static" | "const"))
}

fn attributes(node: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for list in node.named_children(&mut cursor) {
        if list.kind() != "attribute_list" {
            continue;
        }
        let mut inner = list.walk();
        for attribute in list.named_children(&mut inner) {
            if attribute.kind() == "attribute" {
                if let Some(name) = field_text(attribute, "name", source) {
                    names.push(name);
                }
            }
        }
    }
    names
}

fn find_first<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    if kinds.contains(&node.kind()) {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(found) = find_first(child, kinds) {
            return Some(found);
        }
    }
    None
}

fn field_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| node_text(n, source))
}

fn node_text(node: Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source)
        .ok()
        .map(|text| text.split_whitespace().collect::<String>())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"
using System;
using System.ComponentModel.DataAnnotations;

namespace Blog.Models
{
    public class Post
    {
        public int Id { get; set; }
        [Required]
        public string Title { get; set; }
        public System.Int32 TotalViews { get; set; }
        public List<Comment> Comments { get; set; }
        public static int Counter { get; set; }
        public DateTime CreatedAt { get; set; }
    }
}
"#;

    #[test]
    fn test_parse_block_namespace() {
        let model = parse_model(POST).unwrap();
        assert_eq!(model.name, "Post");
        assert_eq!(model.namespace, "Blog.Models");
        let names: Vec<_> = model.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Id", "Title", "TotalViews", "Comments", "CreatedAt"]);
        assert_eq!(model.members[2].type_text, "System.Int32");
        assert_eq!(model.members[3].type_text, "List<Comment>");
        assert_eq!(model.members[1].attributes, ["Required"]);
    }

    #[test]
    fn test_parse_file_scoped_namespace_and_key_attribute() {
        let source = r#"
namespace Shop.Models;

public class Product
{
    [Key]
    public long Sku { get; set; }
    public decimal Price { get; set; }
}
"#;
        let model = parse_model(source).unwrap();
        assert_eq!(model.namespace, "Shop.Models");
        assert_eq!(model.name, "Product");
        assert!(model.members[0].is_key());
        assert!(!model.members[1].is_key());
    }

    #[test]
    fn test_parse_fields() {
        let source = r#"
namespace Shop.Models
{
    public class Tag
    {
        public const int MaxLength = 10;
        public int Id;
        public string Name, Slug;
    }
}
"#;
        let model = parse_model(source).unwrap();
        let names: Vec<_> = model.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Id", "Name", "Slug"]);
        assert_eq!(model.members[2].type_text, "string");
    }

    #[test]
    fn test_non_public_members_are_skipped() {
        let source = r#"
namespace Blog.Models
{
    public class Post
    {
        private string _title;
        protected int _views;
        internal bool Draft { get; set; }
        int Hidden;
        public int Id { get; set; }
        public string Title { get => _title; set => _title = value; }
    }
}
"#;
        let model = parse_model(source).unwrap();
        let names: Vec<_> = model.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Id", "Title"]);
    }

    #[test]
    fn test_missing_namespace_is_malformed() {
        let err = parse_model("public class Orphan { public int Id { get; set; } }").unwrap_err();
        assert!(matches!(err, ScaffoldError::MalformedInput(_)));
    }

    #[test]
    fn test_missing_class_is_malformed() {
        let err = parse_model("namespace Empty { }").unwrap_err();
        assert!(matches!(err, ScaffoldError::MalformedInput(_)));
    }
}
