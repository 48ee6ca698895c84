//! Request/response body entity and its examples
//!
//! A request is parameter-like, plus transport details: mimetype, status,
//! private headers and example payloads.
//!
//!     <request status="200" mimetype="json" type="object">
//!         <param name="name" type="string" summary="name"/>
//!         <param name="age" type="number" summary="age"/>
//!     </request>
//!
//! The same entity describes responses; a callback holds it under the
//! `response` tag.

use super::description::Description;
use super::param::{check_enum_types, duplicate_enums, duplicate_items, Enum, Param};
use super::types::{Semver, Status, Type};
use crate::codec::{
    some_nonempty, to_element, AttrField, ChildField, ContentField, ContentKind, Node,
    ValidateContext,
};
use crate::codec::{parse_bool, render_flag};
use crate::core::{ErrorKind, Range, ValidationError};
use serde::Serialize;

/// An example payload attached to a request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Example {
    pub mimetype: String,
    pub summary: String,
    pub content: String,
    pub location: Range,
}

impl PartialEq for Example {
    fn eq(&self, other: &Self) -> bool {
        self.mimetype == other.mimetype
            && self.summary == other.summary
            && self.content == other.content
    }
}

impl Node for Example {
    const TAG: &'static str = "example";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[
        AttrField {
            name: "mimetype",
            apply: |e, v| {
                e.mimetype = v.to_string();
                Ok(())
            },
            render: |e| some_nonempty(&e.mimetype),
        },
        AttrField {
            name: "summary",
            apply: |e, v| {
                e.summary = v.to_string();
                Ok(())
            },
            render: |e| some_nonempty(&e.summary),
        },
    ];

    const CHILDREN: &'static [ChildField<Self>] = &[];

    const CONTENT: Option<ContentField<Self>> = Some(ContentField {
        kind: ContentKind::CData,
        apply: |e, text| e.content.push_str(&text.value),
        render: |e| some_nonempty(&e.content),
    });

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.content.is_empty() {
            return Err(ctx.error("", ErrorKind::Required));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}

/// A request or response body description.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Request {
    /// Top-level element name when the body mirrors a wire document.
    pub name: String,
    pub ty: Type,
    pub deprecated: Option<Semver>,
    pub enums: Vec<Enum>,
    pub array: bool,
    pub items: Vec<Param>,
    pub reference: String,
    pub summary: String,
    pub status: Option<Status>,
    pub mimetype: String,
    pub examples: Vec<Example>,
    /// Headers private to this request; shared headers live on the owner.
    pub headers: Vec<Param>,
    pub description: Option<Description>,
    pub location: Range,
}

impl Request {
    pub fn is_enum(&self) -> bool {
        !self.enums.is_empty()
    }

    /// View this request as a parameter tree, the shape the JSON
    /// conformance engine consumes.
    pub fn as_param(&self) -> Param {
        Param {
            name: self.name.clone(),
            ty: self.ty,
            deprecated: self.deprecated.clone(),
            default: String::new(),
            optional: true,
            array: self.array,
            array_style: false,
            items: self.items.clone(),
            reference: self.reference.clone(),
            summary: self.summary.clone(),
            enums: self.enums.clone(),
            description: self.description.clone(),
            location: self.location,
        }
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ty == other.ty
            && self.deprecated == other.deprecated
            && self.enums == other.enums
            && self.array == other.array
            && self.items == other.items
            && self.reference == other.reference
            && self.summary == other.summary
            && self.status == other.status
            && self.mimetype == other.mimetype
            && self.examples == other.examples
            && self.headers == other.headers
            && self.description == other.description
    }
}

impl Node for Request {
    const TAG: &'static str = "request";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[
        AttrField {
            name: "name",
            apply: |r, v| {
                r.name = v.to_string();
                Ok(())
            },
            render: |r| some_nonempty(&r.name),
        },
        AttrField {
            name: "type",
            apply: |r, v| {
                r.ty = Type::parse(v)?;
                Ok(())
            },
            render: |r| (r.ty != Type::None).then(|| r.ty.to_string()),
        },
        AttrField {
            name: "deprecated",
            apply: |r, v| {
                r.deprecated = Some(Semver::parse(v)?);
                Ok(())
            },
            render: |r| r.deprecated.as_ref().map(|s| s.to_string()),
        },
        AttrField {
            name: "array",
            apply: |r, v| {
                r.array = parse_bool(v)?;
                Ok(())
            },
            render: |r| render_flag(r.array),
        },
        AttrField {
            name: "ref",
            apply: |r, v| {
                r.reference = v.to_string();
                Ok(())
            },
            render: |r| some_nonempty(&r.reference),
        },
        AttrField {
            name: "summary",
            apply: |r, v| {
                r.summary = v.to_string();
                Ok(())
            },
            render: |r| some_nonempty(&r.summary),
        },
        AttrField {
            name: "status",
            apply: |r, v| {
                r.status = Some(Status::parse(v)?);
                Ok(())
            },
            render: |r| r.status.map(|s| s.to_string()),
        },
        AttrField {
            name: "mimetype",
            apply: |r, v| {
                r.mimetype = v.to_string();
                Ok(())
            },
            render: |r| some_nonempty(&r.mimetype),
        },
    ];

    const CHILDREN: &'static [ChildField<Self>] = &[
        ChildField {
            name: "enum",
            decode: |r, dec, start| {
                r.enums.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |r, out| {
                for item in &r.enums {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "param",
            decode: |r, dec, start| {
                r.items.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |r, out| {
                for item in &r.items {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "example",
            decode: |r, dec, start| {
                r.examples.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |r, out| {
                for item in &r.examples {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "header",
            decode: |r, dec, start| {
                r.headers.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |r, out| {
                for item in &r.headers {
                    let mut element = to_element(item);
                    element.name = "header".to_string();
                    out.push(element);
                }
            },
        },
        ChildField {
            name: "description",
            decode: |r, dec, start| {
                r.description = Some(dec.decode_element(start)?);
                Ok(())
            },
            encode: |r, out| {
                if let Some(desc) = &r.description {
                    out.push(to_element(desc));
                }
            },
        },
    ];

    const CONTENT: Option<ContentField<Self>> = None;

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.ty == Type::Object && self.items.is_empty() {
            return Err(ctx.error("/param", ErrorKind::Required));
        }
        if let Some(value) = duplicate_enums(&self.enums) {
            return Err(ctx.error("/enum", ErrorKind::DuplicateValue).with_value(value));
        }
        check_enum_types(self.ty, &self.enums, ctx)?;
        if !self.mimetype.is_empty() {
            for example in &self.examples {
                if !example.mimetype.is_empty() && example.mimetype != self.mimetype {
                    return Err(ctx
                        .error(&format!("/example/@{}", example.mimetype), ErrorKind::InvalidValue));
                }
            }
        }
        for header in &self.headers {
            if header.ty == Type::Object {
                return Err(ctx.error(
                    &format!("/header[{}].type", header.name),
                    ErrorKind::InvalidValue,
                ));
            }
        }
        if let Some(name) = duplicate_items(&self.items) {
            return Err(ctx.error("/param", ErrorKind::DuplicateValue).with_value(name));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Decoder;
    use crate::core::{Block, ParseError};

    fn decode(data: &str) -> Result<Request, ParseError> {
        let block = Block::new("mem:test", 0, data);
        Decoder::new(&block).decode()
    }

    #[test]
    fn test_decode_flat_request() {
        let r = decode(r#"<Request type="string" mimetype="json"></Request>"#).expect("decode");
        assert_eq!(r.ty, Type::String);
        assert_eq!(r.mimetype, "json");
    }

    #[test]
    fn test_decode_object_request() {
        let r = decode(
            r#"<Request deprecated="1.1.1" type="object" array="true" mimetype="json">
                <param name="name" type="string" summary="name"/>
                <param name="sex" type="string" summary="sex">
                    <enum value="male">Male</enum>
                    <enum value="female">Female</enum>
                </param>
                <param name="age" type="number" summary="age"/>
            </Request>"#,
        )
        .expect("decode");
        assert!(r.array);
        assert_eq!(r.ty, Type::Object);
        assert_eq!(r.deprecated.as_ref().unwrap().as_str(), "1.1.1");
        assert_eq!(r.items.len(), 3);
    }

    #[test]
    fn test_object_request_without_children_fails() {
        let err = decode(r#"<Request type="object" mimetype="json"></Request>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.field(), "/Request/param");
    }

    #[test]
    fn test_case_insensitive_type_literal() {
        let err = decode(r#"<Request type="Object" mimetype="json"></Request>"#).unwrap_err();
        // "Object" parses; the failure is the missing children.
        assert_eq!(err.field(), "/Request/param");
    }

    #[test]
    fn test_duplicate_children_rejected() {
        let err = decode(
            r#"<Request type="object" mimetype="json">
                <param name="n1" type="string" summary="a"/>
                <param name="n1" type="number" summary="b"/>
            </Request>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateValue);
        assert_eq!(err.field(), "/Request/param");
    }

    #[test]
    fn test_request_level_enums() {
        let r = decode(
            r#"<Request name="sex" type="string" mimetype="json">
                <enum value="male">Male</enum>
                <enum value="female">Female</enum>
            </Request>"#,
        )
        .expect("decode");
        assert!(r.is_enum());
        assert_eq!(r.enums.len(), 2);
    }

    #[test]
    fn test_bad_deprecated_version() {
        let err = decode(r#"<Request deprecated="x.1.1" mimetype="json">text</Request>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.field(), "/Request/@deprecated");
    }

    #[test]
    fn test_object_headers_rejected() {
        let err = decode(
            r#"<request type="string" mimetype="json">
                <header name="h" type="object" summary="h">
                    <param name="x" type="string" summary="x"/>
                </header>
            </request>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), "/request/header[h].type");
    }

    #[test]
    fn test_example_mimetype_must_match() {
        let err = decode(
            r#"<request type="string" mimetype="json">
                <example mimetype="xml"><![CDATA[<x/>]]></example>
            </request>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), "/request/example/@xml");

        decode(
            r#"<request type="string" mimetype="json">
                <example mimetype="json"><![CDATA[{"a":1}]]></example>
            </request>"#,
        )
        .expect("matching mimetype is fine");
    }

    #[test]
    fn test_example_requires_content() {
        let err = decode(
            r#"<request type="string" mimetype="json">
                <example mimetype="json"></example>
            </request>"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Required);
        assert_eq!(err.field(), "/request/example");
    }

    #[test]
    fn test_status_attribute() {
        let r = decode(r#"<request status="404" type="string" mimetype="json"/>"#).expect("decode");
        assert_eq!(r.status.unwrap().code(), 404);

        let err = decode(r#"<request status="9000" type="string"/>"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_eq!(err.field(), "/request/@status");
    }

    #[test]
    fn test_as_param_keeps_tree() {
        let r = decode(
            r#"<request type="object" mimetype="json">
                <param name="age" type="number" summary="age"/>
            </request>"#,
        )
        .expect("decode");
        let p = r.as_param();
        assert_eq!(p.ty, Type::Object);
        assert!(p.optional);
        assert_eq!(p.items.len(), 1);
        assert_eq!(p.child("age").unwrap().ty, Type::Number);
    }
}
