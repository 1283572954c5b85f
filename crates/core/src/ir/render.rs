//! Template rendering of the output model.
//!
//! The layout is pinned byte for byte: two leading blank lines, event
//! interfaces back to back, a service name that continues the previous import
//! line, and a trailing blank line. Tags trim with `{%-`/`-%}` so every
//! newline in the output is one written in the template text.

use tera::{Context, Tera};

use crate::error::{Error, Result};

use super::types::XStateModule;

const TEMPLATE_NAME: &str = "xstate.ts";

const XSTATE_TEMPLATE: &str = r#"

import { grpc } from "{{ transport_module }}"
{%- if has_stream %}
import { Observable } from "{{ stream_module }}"
{%- endif %}
import {
{%- for item in imports.items %}
{%- if item.joins_previous %}{{ item.name }},{% else %}
  {{ item.name }},{% endif %}
{%- endfor %}
} from "{{ imports.module }}"

{% for event in events -%}
export interface {{ event.name }} {
    type: "{{ event.discriminant }}",
    data: {{ event.data_type }},
    metadata?: grpc.Metadata,
}
{% endfor %}
{%- for union in service_unions %}
export type {{ union.name }} =
{% for member in union.members %}  | {{ member }}
{% endfor %}
{%- endfor %}
export type {{ top_union_name }} = {% for member in top_union %}{{ member.name }}{{ member.separator }}{% endfor %}
{% for table in dispatch_tables %}
export interface {{ table.context }} {
  service: {{ table.service }}
}

export const {{ table.name }} = {
{%- for entry in table.entries %}
  {{ entry.method }}: <TContext>(
    ctx: TContext & {{ table.context }},
    ev: {{ entry.event_type }},
  ): {{ entry.result }}<{{ entry.response_type }}> => {
    return ctx.service.{{ entry.method }}(ev.data, ev.metadata)
  },
{%- endfor %}
}
{% endfor %}
"#;

/// Renders [`XStateModule`]s with the built-in template.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Parse the template. Fails only if the template itself is broken.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, XSTATE_TEMPLATE)
            .map_err(Error::Template)?;
        Ok(Self { tera })
    }

    /// Render a module. `file` names the source proto in error messages.
    pub fn render(&self, file: &str, module: &XStateModule) -> Result<String> {
        let render_error = |source: tera::Error| Error::Render {
            file: file.to_string(),
            source,
        };
        let context = Context::from_serialize(module).map_err(render_error)?;
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(render_error)
    }
}
