//! Callback entity
//!
//!     <callback method="POST" summary="state change">
//!         <request status="200" mimetype="json" type="object">
//!             <param name="id" type="number" summary="id"/>
//!         </request>
//!     </callback>
//!
//! A callback needs a method and at least one request; responses are
//! optional.

use super::description::Description;
use super::param::Param;
use super::request::Request;
use super::types::Semver;
use crate::codec::{
    some_nonempty, to_element, AttrField, ChildField, ContentField, Node, ValidateContext,
};
use crate::core::{ErrorKind, Range, ValidationError};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Callback {
    pub method: String,
    pub summary: String,
    pub deprecated: Option<Semver>,
    pub reference: String,
    pub requests: Vec<Request>,
    pub responses: Vec<Request>,
    pub headers: Vec<Param>,
    pub description: Option<Description>,
    pub location: Range,
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.summary == other.summary
            && self.deprecated == other.deprecated
            && self.reference == other.reference
            && self.requests == other.requests
            && self.responses == other.responses
            && self.headers == other.headers
            && self.description == other.description
    }
}

impl Node for Callback {
    const TAG: &'static str = "callback";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[
        AttrField {
            name: "method",
            apply: |c, v| {
                c.method = v.to_string();
                Ok(())
            },
            render: |c| Some(c.method.clone()),
        },
        AttrField {
            name: "summary",
            apply: |c, v| {
                c.summary = v.to_string();
                Ok(())
            },
            render: |c| some_nonempty(&c.summary),
        },
        AttrField {
            name: "deprecated",
            apply: |c, v| {
                c.deprecated = Some(Semver::parse(v)?);
                Ok(())
            },
            render: |c| c.deprecated.as_ref().map(|s| s.to_string()),
        },
        AttrField {
            name: "ref",
            apply: |c, v| {
                c.reference = v.to_string();
                Ok(())
            },
            render: |c| some_nonempty(&c.reference),
        },
    ];

    const CHILDREN: &'static [ChildField<Self>] = &[
        ChildField {
            name: "request",
            decode: |c, dec, start| {
                c.requests.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |c, out| {
                for item in &c.requests {
                    out.push(to_element(item));
                }
            },
        },
        ChildField {
            name: "response",
            decode: |c, dec, start| {
                c.responses.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |c, out| {
                for item in &c.responses {
                    let mut element = to_element(item);
                    element.name = "response".to_string();
                    out.push(element);
                }
            },
        },
        ChildField {
            name: "header",
            decode: |c, dec, start| {
                c.headers.push(dec.decode_element(start)?);
                Ok(())
            },
            encode: |c, out| {
                for item in &c.headers {
                    let mut element = to_element(item);
                    element.name = "header".to_string();
                    out.push(element);
                }
            },
        },
        ChildField {
            name: "description",
            decode: |c, dec, start| {
                c.description = Some(dec.decode_element(start)?);
                Ok(())
            },
            encode: |c, out| {
                if let Some(desc) = &c.description {
                    out.push(to_element(desc));
                }
            },
        },
    ];

    const CONTENT: Option<ContentField<Self>> = None;

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.method.is_empty() {
            return Err(ctx.error("/@method", ErrorKind::Required));
        }
        if self.requests.is_empty() {
            return Err(ctx.error("/request", ErrorKind::Required));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}
