//! Parameter and enum entities
//!
//! A parameter describes one named value:
//!
//!     <param name="user" type="object" array="true">
//!         <param name="name" type="string" summary="display name"/>
//!         <param name="sex" type="string" summary="sex">
//!             <enum value="male">Male</enum>
//!             <enum value="female">Female</enum>
//!         </param>
//!         <param name="age" type="number" summary="age"/>
//!     </param>
//!
//! Invariants enforced after mapping: a parameter needs a name, a non-none
//! type, and a summary or description; an object carries at least one child;
//! sibling children are distinct by name; enum values are distinct and must
//! satisfy the declared type's lexical grammar.

use super::description::Description;
use super::types::{is_bool_literal, is_integer_literal, Semver, Type};
use crate::codec::{
    parse_bool, render_flag, some_nonempty, to_element, AttrField, ChildField, ContentField,
    ContentKind, Node, ValidateContext,
};
use crate::core::{ErrorKind, Range, ValidationError};
use serde::Serialize;

/// One enumerated value of a parameter. The element body is the
/// description:
///
///     <enum value="male" summary="male"/>
///     <enum value="female">Female</enum>
#[derive(Debug, Clone, Default, Serialize)]
pub struct Enum {
    pub value: String,
    pub summary: String,
    pub description: String,
    pub deprecated: Option<Semver>,
    pub location: Range,
}

impl PartialEq for Enum {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.summary == other.summary
            && self.description == other.description
            && self.deprecated == other.deprecated
    }
}

impl Node for Enum {
    const TAG: &'static str = "enum";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[
        AttrField {
            name: "value",
            apply: |e, v| {
                e.value = v.to_string();
                Ok(())
            },
            render: |e| Some(e.value.clone()),
        },
        AttrField {
            name: "summary",
            apply: |e, v| {
                e.summary = v.to_string();
                Ok(())
            },
            render: |e| some_nonempty(&e.summary),
        },
        AttrField {
            name: "deprecated",
            apply: |e, v| {
                e.deprecated = Some(Semver::parse(v)?);
                Ok(())
            },
            render: |e| e.deprecated.as_ref().map(|s| s.to_string()),
        },
    ];

    const CHILDREN: &'static [ChildField<Self>] = &[];

    const CONTENT: Option<ContentField<Self>> = Some(ContentField {
        kind: ContentKind::CData,
        apply: |e, text| e.description.push_str(&text.value),
        render: |e| some_nonempty(&e.description),
    });

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.value.is_empty() {
            return Err(ctx.error("/@value", ErrorKind::Required));
        }
        if self.summary.is_empty() && self.description.is_empty() {
            return Err(ctx.error("/@summary", ErrorKind::Required));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}

/// A named, typed value in a request or response body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub deprecated: Option<Semver>,
    pub default: String,
    pub optional: bool,
    pub array: bool,
    /// Query-array rendering: `k=1&k=2` by default, `k=1,2` when set.
    pub array_style: bool,
    pub items: Vec<Param>,
    pub reference: String,
    pub summary: String,
    pub enums: Vec<Enum>,
    pub description: Option<Description>,
    pub location: Range,
}

impl Param {
    /// Whether this parameter restricts its values to an enumeration.
    pub fn is_enum(&self) -> bool {
        !self.enums.is_empty()
    }

    /// Resolve a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Param> {
        self.items.iter().find(|p| p.name == name)
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ty == other.ty
            && self.deprecated == other.deprecated
            && self.default == other.default
            && self.optional == other.optional
            && self.array == other.array
            && self.array_style == other.array_style
            && self.items == other.items
            && self.reference == other.reference
            && self.summary == other.summary
            && self.enums == other.enums
            && self.description == other.description
    }
}

impl Node for Param {
    const TAG: &'static str = "param";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[
        AttrField {
            name: "name",
            apply: |p, v| {
                p.name = v.to_string();
                Ok(())
            },
            render: |p| some_nonempty(&p.name),
        },
        AttrField {
            name: "type",
            apply: |p, v| {
                p.ty = Type::parse(v)?;
                Ok(())
            },
            render: |p| (p.ty != Type::None).then(|| p.ty.to_string()),
        },
        AttrField {
            name: "deprecated",
            apply: |p, v| {
                p.deprecated = Some(Semver::parse(v)?);
                Ok(())
            },
            render: |p| p.deprecated.as_ref().map(|s| s.to_string()),
        },
        AttrField {
            name: "default",
            apply: |p, v| {
                p.default = v.to_string();
                Ok(())
            },
            render: |p| some_nonempty(&p.default),
        },
        AttrField {
            name: "optional",
            apply: |p, v| {
                p.optional = parse_bool(v)?;
                Ok(())
            },
            render: |p| render_flag(p.optional),
        },
        AttrField {
            name: "array",
            apply: |p, v| {
                p.array = parse_bool(v)?;
                Ok(())
            },
            render: |p| render_flag(p.array),
        },
        AttrField {
            name: "array-style",
            apply: |p, v| {
                p.array_style = parse_bool(v)?;
                Ok(())
            },
            render: |p| render_flag(p.array_style),
        },
        AttrField {
            name: "ref",
            apply: |p, v| {
                p.reference = v.to_string();
                Ok(())
            },
            render: |p| some_nonempty(&p.reference),
        },
        AttrField {
            name: "summary",
            apply: |p, v| {
                p.summary = v.to_string();
                Ok(())
            },
            render: |p| some_nonempty(&p.summary),
        },
    ];

    const CHILDREN: &'static [ChildField<Self>] = &[
        ChildField {
            name: "param",
            decode: |p, dec, start| {
                p.items.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |p, out| {
                for item in &p.items {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "enum",
            decode: |p, dec, start| {
                p.enums.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |p, out| {
                for item in &p.enums {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "description",
            decode: |p, dec, start| {
                p.description = Some(dec.decode_element(start)?);
                Ok(())
            },
            encode: |p, out| {
                if let Some(desc) = &p.description {
                    out.push(to_element(desc));
                }
            },
        },
    ];

    const CONTENT: Option<ContentField<Self>> = None;

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ctx.error("/@name", ErrorKind::Required));
        }
        if self.ty == Type::None {
            return Err(ctx.error("/@type", ErrorKind::Required));
        }
        if self.ty == Type::Object && self.items.is_empty() {
            return Err(ctx.error("/param", ErrorKind::Required));
        }
        if let Some(value) = duplicate_enums(&self.enums) {
            return Err(ctx.error("/enum", ErrorKind::DuplicateValue).with_value(value));
        }
        check_enum_types(self.ty, &self.enums, ctx)?;
        if let Some(name) = duplicate_items(&self.items) {
            return Err(ctx.error("/param", ErrorKind::DuplicateValue).with_value(name));
        }
        if self.summary.is_empty() && self.description.as_ref().map_or(true, |d| d.is_empty()) {
            return Err(ctx.error("/summary", ErrorKind::Required));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}

/// Check enum values against the lexical grammar of the declared type.
pub(crate) fn check_enum_types(
    ty: Type,
    enums: &[Enum],
    ctx: &ValidateContext,
) -> Result<(), ValidationError> {
    if enums.is_empty() {
        return Ok(());
    }
    match ty {
        Type::Number => {
            for item in enums {
                if !is_integer_literal(&item.value) {
                    return Err(ctx.error(&format!("/enum/@{}", item.value), ErrorKind::InvalidFormat));
                }
            }
        }
        Type::Bool => {
            for item in enums {
                if !is_bool_literal(&item.value) {
                    return Err(ctx.error(&format!("/enum/@{}", item.value), ErrorKind::InvalidFormat));
                }
            }
        }
        Type::Object | Type::None => {
            return Err(ctx.error("/enum", ErrorKind::InvalidValue));
        }
        Type::String => {}
    }
    Ok(())
}

/// First repeated enum value, if any. Candidates are sorted descending and
/// scanned for an adjacent repeat, so which duplicate is cited follows sort
/// order, not declaration order.
pub fn duplicate_enums(enums: &[Enum]) -> Option<&str> {
    first_duplicate(enums.iter().map(|e| e.value.as_str()).collect())
}

/// First repeated child name, if any.
pub fn duplicate_items(items: &[Param]) -> Option<&str> {
    first_duplicate(items.iter().map(|p| p.name.as_str()).collect())
}

fn first_duplicate(mut keys: Vec<&str>) -> Option<&str> {
    keys.sort_by(|a, b| b.cmp(a));
    keys.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, Decoder};
    use crate::core::{Block, ParseError};

    fn decode(data: &str) -> Result<Param, ParseError> {
        let block = Block::new("mem:test", 0, data);
        Decoder::new(&block).decode()
    }

    fn decode_enum(data: &str) -> Result<Enum, ParseError> {
        let block = Block::new("mem:test", 0, data);
        Decoder::new(&block).decode()
    }

    #[test]
    fn test_enum_decode() {
        let e = decode_enum(r#"<enum value="male" summary="male"/>"#).expect("decode");
        assert_eq!(e.value, "male");
        assert_eq!(e.summary, "male");

        let e = decode_enum(r#"<enum value="female">Female</enum>"#).expect("decode");
        assert_eq!(e.description, "Female");
    }

    #[test]
    fn test_enum_requires_value() {
        let err = decode_enum(r#"<enum summary="x"/>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.field(), "/enum/@value");
    }

    #[test]
    fn test_enum_requires_summary_or_description() {
        let err = decode_enum(r#"<enum value="v1"></enum>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.field(), "/enum/@summary");
    }

    #[test]
    fn test_enum_rejects_bad_deprecated_version() {
        let err = decode_enum(r#"<enum value="url" deprecated="x.1.1">text</enum>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.field(), "/enum/@deprecated");
    }

    #[test]
    fn test_param_decode_with_enums() {
        let p = decode(
            r#"<param name="sex" type="string" summary="sex">
                <enum value="male">Male</enum>
                <enum value="female">Female</enum>
            </param>"#,
        )
        .expect("decode");
        assert_eq!(p.name, "sex");
        assert_eq!(p.ty, Type::String);
        assert_eq!(p.enums.len(), 2);
        assert!(p.is_enum());
    }

    #[test]
    fn test_param_requires_name_and_type() {
        let err = decode(r#"<param type="string" summary="s"/>"#).unwrap_err();
        assert_eq!(err.field(), "/param/@name");

        let err = decode(r#"<param name="x" summary="s"/>"#).unwrap_err();
        assert_eq!(err.field(), "/param/@type");
        assert_eq!(err.kind(), ErrorKind::Required);
    }

    #[test]
    fn test_object_param_requires_children() {
        let err = decode(r#"<param name="user" type="object" summary="user"></param>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.field(), "/param/param");
    }

    #[test]
    fn test_duplicate_child_names_rejected() {
        let err = decode(
            r#"<param name="user" type="object" summary="user">
                <param name="n1" type="string" summary="a"/>
                <param name="n1" type="number" summary="b"/>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateValue);
        assert_eq!(err.field(), "/param/param");
    }

    #[test]
    fn test_duplicate_enum_values_rejected() {
        let err = decode(
            r#"<param name="sex" type="string" summary="sex">
                <enum value="male">M</enum>
                <enum value="male">M2</enum>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateValue);
        assert_eq!(err.field(), "/param/enum");
    }

    #[test]
    fn test_number_enums_must_be_integers() {
        let err = decode(
            r#"<param name="n" type="number" summary="n">
                <enum value="4.2">x</enum>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.field(), "/param/enum/@4.2");

        decode(
            r#"<param name="n" type="number" summary="n">
                <enum value="42">x</enum>
            </param>"#,
        )
        .expect("integer enums are fine");
    }

    #[test]
    fn test_bool_enums_must_be_bool_literals() {
        let err = decode(
            r#"<param name="b" type="bool" summary="b">
                <enum value="maybe">x</enum>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_object_with_enums_rejected() {
        let err = decode(
            r#"<param name="o" type="object" summary="o">
                <param name="x" type="string" summary="x"/>
                <enum value="a">A</enum>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), "/param/enum");
    }

    #[test]
    fn test_child_error_carries_ancestor_path() {
        let err = decode(
            r#"<param name="user" type="object" summary="user">
                <param name="sex" type="string" summary="sex">
                    <enum summary="missing value"/>
                </param>
            </param>"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), "/param/param/enum/@value");
    }

    #[test]
    fn test_unknown_attributes_and_elements_skipped() {
        let p = decode(
            r#"<param name="x" type="string" summary="s" custom="ignored">
                <annotation><nested/>text</annotation>
            </param>"#,
        )
        .expect("decode");
        assert_eq!(p.name, "x");
    }

    #[test]
    fn test_duplicate_detection_helpers() {
        let mk = |v: &str| Enum {
            value: v.to_string(),
            summary: "s".to_string(),
            ..Default::default()
        };
        assert_eq!(duplicate_enums(&[mk("a"), mk("b")]), None);
        assert_eq!(duplicate_enums(&[mk("a"), mk("b"), mk("a")]), Some("a"));
        assert_eq!(duplicate_enums(&[]), None);
    }

    #[test]
    fn test_encode_decode_scenario() {
        let p = decode(
            r#"<param name="sex" type="string" summary="sex">
                <enum value="male">Male</enum>
                <enum value="female">Female</enum>
            </param>"#,
        )
        .expect("decode");

        let markup = encode(&to_element(&p), "  ");
        let block = Block::new("mem:test", 0, markup);
        let decoded: Param = Decoder::new(&block).decode().expect("re-decode");
        assert_eq!(decoded, p);
    }
}
