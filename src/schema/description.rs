//! Rich-text description element
//!
//! A `<description type="html"><![CDATA[...]]></description>` payload
//! attached to parameters, requests and callbacks. The optional `type`
//! attribute names the text format; the body is the text itself.

use crate::codec::{
    some_nonempty, AttrField, ChildField, ContentField, ContentKind, Node, ValidateContext,
};
use crate::core::{ErrorKind, Range, ValidationError};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Description {
    /// Text format of the body, such as `html` or `markdown`.
    pub ty: Option<String>,
    pub text: String,
    pub location: Range,
}

impl Description {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for Description {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.text == other.text
    }
}

impl Node for Description {
    const TAG: &'static str = "description";

    const ATTRIBUTES: &'static [AttrField<Self>] = &[AttrField {
        name: "type",
        apply: |d, v| {
            d.ty = Some(v.to_string());
            Ok(())
        },
        render: |d| d.ty.clone(),
    }];

    const CHILDREN: &'static [ChildField<Self>] = &[];

    const CONTENT: Option<ContentField<Self>> = Some(ContentField {
        kind: ContentKind::CData,
        apply: |d, text| d.text.push_str(&text.value),
        render: |d| some_nonempty(&d.text),
    });

    fn validate(&self, ctx: &ValidateContext) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ctx.error("", ErrorKind::Required));
        }
        Ok(())
    }

    fn set_location(&mut self, range: Range) {
        self.location = range;
    }
}
