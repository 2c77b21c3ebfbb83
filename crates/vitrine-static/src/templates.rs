//! Template engine for rendering preview pages.

use std::fmt::Write;

use minijinja::{escape_formatter, AutoEscape, Environment, Error, Output, State, Value};
use serde::Serialize;

use crate::html::{escape_html, escape_source};

/// Context for the index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    /// Page title
    pub title: String,
    pub categories: Vec<CategoryView>,
}

/// A category heading with its subcategory blocks.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub name: String,
    /// Anchor ID
    pub id: String,
    pub subcategories: Vec<SubcategoryView>,
}

/// A subcategory block with its section cards.
#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryView {
    pub name: String,
    /// Composite anchor ID (`category-subcategory`)
    pub id: String,
    pub sections: Vec<SectionCard>,
}

/// Summary card linking to a section page.
#[derive(Debug, Clone, Serialize)]
pub struct SectionCard {
    pub name: String,
    pub href: String,
    /// Pluralized component count
    pub count_label: String,
}

/// A breadcrumb link back into the index page.
#[derive(Debug, Clone, Serialize)]
pub struct Crumb {
    pub name: String,
    pub href: String,
}

/// Context for a section page.
#[derive(Debug, Clone, Serialize)]
pub struct SectionPage {
    /// Page title
    pub title: String,
    /// Section display name
    pub name: String,
    pub category: Crumb,
    pub subcategory: Crumb,
    pub components: Vec<ComponentView>,
}

/// One component block on a section page.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    /// Anchor ID (`component-<hash>`)
    pub id: String,
    pub hash: String,
    pub title: String,
    /// Frame source
    pub url: String,
    /// Raw rendered markup, escaped by the `source` filter
    pub source: String,
    pub has_alpine: bool,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the preview templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);
        env.add_filter("source", source_filter);

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("section.html".to_string(), SECTION_TEMPLATE.to_string())
            .expect("Failed to add section template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page<C: Serialize>(
        &self,
        template: &str,
        context: &C,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape every unsafe string with [`escape_html`] in HTML templates.
///
/// minijinja's built-in escaper also encodes `/`, which would mangle every
/// url in the generated pages.
fn html_formatter(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(s) = value.as_str() {
            out.write_str(&escape_html(s))?;
            return Ok(());
        }
    }
    escape_formatter(out, state, value)
}

fn source_filter(raw: &str) -> Value {
    Value::from_safe_string(escape_source(raw))
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@500;600&display=auto" rel="stylesheet">
  {% block styles %}{% endblock %}<link href="/css/app.css" rel="stylesheet">
  {% block head_scripts %}{% endblock %}
</head>
<body class="font-sans antialiased text-gray-900">
<main>
{% block content %}{% endblock %}
</main>
{% block scripts %}{% endblock %}
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block styles %}<style>* { box-sizing: border-box; }</style>
  {% endblock %}

{% block content %}
<div class="max-w-8xl mx-auto grid grid-cols-1 gap-y-16 px-4 py-4 sm:px-6 sm:py-12 lg:px-8">
{% for category in categories %}
  <div id="{{ category.id }}">
    <div class="pb-2">
      <div class="h-5"></div>
    </div>
    <h2 class="text-2xl leading-8 font-semibold tracking-tight font-display text-gray-900 sm:text-3xl sm:leading-9">
      {{ category.name }}
    </h2>
    <div class="mt-6 grid grid-cols-1 gap-y-8">
    {% for subcategory in category.subcategories %}
      <div id="{{ subcategory.id }}" class="border-t border-gray-200 pt-8 grid grid-cols-1 gap-y-6 lg:grid-cols-4 lg:gap-5">
        <div>
          <h3 class="text-lg leading-7 font-medium tracking-tight text-gray-900">
            {{ subcategory.name }}
          </h3>
        </div>
        <div class="grid grid-cols-1 gap-y-8 sm:grid-cols-2 sm:gap-x-5 sm:gap-y-6 md:grid-cols-3 lg:col-span-3">
        {% for section in subcategory.sections %}
          <div class="border border-gray-300 rounded-md p-2">
            <a href="{{ section.href }}" class="block group">
              <div>
                <p class="text-sm leading-5 font-medium text-gray-900">{{ section.name }}</p>
                <p class="text-sm leading-5 text-gray-500">{{ section.count_label }}</p>
              </div>
            </a>
          </div>
        {% endfor %}
        </div>
      </div>
    {% endfor %}
    </div>
  </div>
{% endfor %}
</div>
{% endblock %}"##;

const SECTION_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block styles %}<link href="https://cdn.jsdelivr.net/npm/highlightjs-themes@1.0.0/darkula.css" rel="stylesheet">
  <link href="/css/preview.css" rel="stylesheet">
  {% endblock %}

{% block head_scripts %}<script src="https://cdn.jsdelivr.net/combine/npm/highlightjs@9.16.2/highlight.pack.min.js,npm/axios@0.19.2/dist/axios.min.js,npm/dlv@1.1.3/dist/dlv.umd.min.js,gh/alpinejs/alpine@v2.2.1/dist/alpine.js,npm/fuse.js@5.0.9-beta/dist/fuse.min.js"></script>{% endblock %}

{% block content %}
<div class="py-4 sm:py-12">
  <div class="max-w-8xl mx-auto px-4 sm:px-6 lg:px-8">
    <div class="pb-2">
      <nav class="flex items-center text-sm leading-5 font-medium">
        <a href="{{ category.href }}" class="text-gray-500 hover:text-gray-700 focus:outline-none focus:underline transition duration-150 ease-in-out">
          {{ category.name }}
        </a>
        <svg class="flex-shrink-0 mx-2 h-5 w-5 text-gray-400" fill="currentColor" viewBox="0 0 20 20">
          <path fill-rule="evenodd" d="M7.293 14.707a1 1 0 010-1.414L10.586 10 7.293 6.707a1 1 0 011.414-1.414l4 4a1 1 0 010 1.414l-4 4a1 1 0 01-1.414 0z" clip-rule="evenodd" />
        </svg>
        <a href="{{ subcategory.href }}" class="text-gray-500 hover:text-gray-700 focus:outline-none focus:underline transition duration-150 ease-in-out">
          {{ subcategory.name }}
        </a>
      </nav>
    </div>
    <h2 class="text-2xl leading-8 font-semibold font-display text-gray-900 sm:text-3xl sm:leading-9">
      {{ name }}
    </h2>
  </div>
  <div class="mt-6 bg-white max-w-8xl mx-auto sm:px-6 lg:px-8">
    <div class="max-w-8xl mx-auto">
    {% for component in components %}
      <div id="{{ component.id }}" x-data="{ activeTab: 'preview' }" class="border-b border-t border-gray-200 sm:border sm:rounded-lg overflow-hidden mb-16">
        <div class="px-4 py-2 border-b border-gray-200 flex justify-between items-center bg-white sm:py-4 sm:px-6 sm:items-baseline">
          <div class="flex-shrink min-w-0 flex items-center">
            <h3 class="flex-shrink min-w-0 font-regular text-base md:text-lg leading-snug truncate">
              <a href="#{{ component.id }}">{{ component.title }}</a>
            </h3>
            {% if component.has_alpine %}<a href="https://tailwindui.com/documentation#integrating-with-javascript-frameworks" class="ml-4 bg-pink-100 rounded-full px-2 py-0.5 flex items-center text-xs leading-4 tracking-wide uppercase font-semibold"><span class="text-pink-700">Requires JS</span></a>{% endif %}
          </div>
          <div class="ml-4 flex flex-shrink-0 items-center">
            <div class="flex items-center text-sm sm:hidden">
              <button type="button" @click="activeTab === 'preview' ? (activeTab = 'code') : (activeTab = 'preview')" :class="{'bg-indigo-50 text-indigo-700': activeTab === 'code', 'text-gray-400 hover:text-gray-600 focus:text-gray-600': activeTab !== 'code'}" class="inline-block rounded-lg font-medium leading-none py-3 px-3 focus:outline-none text-gray-400 hover:text-gray-600 focus:text-gray-600">
                <svg class="h-5 w-5" fill="currentColor" viewBox="0 0 20 20">
                  <path fill-rule="evenodd" d="M12.316 3.051a1 1 0 01.633 1.265l-4 12a1 1 0 11-1.898-.632l4-12a1 1 0 011.265-.633zM5.707 6.293a1 1 0 010 1.414L3.414 10l2.293 2.293a1 1 0 11-1.414 1.414l-3-3a1 1 0 010-1.414l3-3a1 1 0 011.414 0zm8.586 0a1 1 0 011.414 0l3 3a1 1 0 010 1.414l-3 3a1 1 0 11-1.414-1.414L16.586 10l-2.293-2.293a1 1 0 010-1.414z" clip-rule="evenodd"></path>
                </svg>
              </button>
            </div>
            <div class="hidden sm:flex items-center text-sm md:text-base">
              <button type="button" @click="activeTab = 'preview'" :class="{'bg-indigo-50 text-indigo-700': activeTab === 'preview', 'text-gray-500 hover:text-indigo-600 focus:text-indigo-600': activeTab !== 'preview'}" class="inline-block rounded-lg font-medium leading-none py-2 px-3 focus:outline-none bg-indigo-50 text-indigo-700">
                Preview
              </button>
              <button type="button" @click="activeTab = 'code'" :class="{'bg-indigo-50 text-indigo-700': activeTab === 'code', 'text-gray-500 hover:text-indigo-600 focus:text-indigo-600': activeTab !== 'code'}" class="ml-2 inline-block rounded-lg font-medium leading-none py-2 px-3 focus:outline-none text-gray-500 hover:text-indigo-600 focus:text-indigo-600">
                Code
              </button>
              <textarea class="hidden" data-source-for="{{ component.hash }}">{{ component.source | source }}</textarea>
            </div>
            <div class="hidden sm:flex sm:items-center">
              <div class="pl-4 pr-4 self-stretch">
                <div class="h-5 border-l border-gray-200"></div>
              </div>
              <button type="button" data-copy-source="{{ component.hash }}" class="ml-3 text-gray-400 hover:text-gray-500">
                <svg class="h-5 w-5" fill="currentColor" viewBox="0 0 20 20">
                  <title>Copy</title>
                  <path d="M8 3a1 1 0 011-1h2a1 1 0 110 2H9a1 1 0 01-1-1z"></path>
                  <path d="M6 3a2 2 0 00-2 2v11a2 2 0 002 2h8a2 2 0 002-2V5a2 2 0 00-2-2 3 3 0 01-3 3H9a3 3 0 01-3-3z"></path>
                </svg>
              </button>
            </div>
          </div>
        </div>
        <div class="relative bg-gray-500">
          <div :class="{ 'block': activeTab === 'preview', 'hidden': activeTab !== 'preview' }" class="block">
            <div x-data="resizableIFrame()" x-init="init()" x-ref="root" :style="'max-width: 100%; width: ' + width" class="sm:min-w-preview-mobile relative sm:pr-4" style="max-width: 100%; width: 100%">
              <iframe class="w-full" data-id="{{ component.hash }}" src="{{ component.url }}" style="height: 265px;"></iframe>
              <div :class="{ 'pointer-events-none': !resizing }" class="absolute opacity-0 inset-0 pointer-events-none"></div>
              <div x-ref="handle" data-resize-handle style="cursor: ew-resize;" class="sr-only sm:not-sr-only sm:border-l sm:bg-gray-100 sm:absolute sm:right-0 sm:inset-y-0 sm:flex sm:items-center sm:w-4">
                <svg class="h-4 w-4 text-gray-600 pointer-events-none" fill="currentColor" viewBox="0 0 24 24">
                  <path d="M8 5h2v14H8zM14 5h2v14h-2z"></path>
                </svg>
              </div>
            </div>
          </div>
          <div :class="{ 'block': activeTab === 'code', 'hidden': activeTab !== 'code' }" class="hidden">
            <pre class="block scrollbar-none m-0 p-0 overflow-auto text-white text-sm bg-gray-800 leading-normal"><code class="inline-block p-4 scrolling-touch subpixel-antialiased" data-code-for="{{ component.hash }}"></code></pre>
          </div>
        </div>
      </div>
    {% endfor %}
    </div>
  </div>
</div>
{% endblock %}

{% block scripts %}<script src="/js/preview.js"></script>{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn section_page(components: Vec<ComponentView>) -> SectionPage {
        SectionPage {
            title: "Components".to_string(),
            name: "Primary".to_string(),
            category: Crumb {
                name: "Elements".to_string(),
                href: "/#elements".to_string(),
            },
            subcategory: Crumb {
                name: "Buttons".to_string(),
                href: "/#elements-buttons".to_string(),
            },
            components,
        }
    }

    fn component(source: &str) -> ComponentView {
        ComponentView {
            id: "component-abc".to_string(),
            hash: "abc".to_string(),
            title: "Primary <Button>".to_string(),
            url: "/elements/buttons/primary/1.html".to_string(),
            source: source.to_string(),
            has_alpine: false,
        }
    }

    #[test]
    fn renders_index_page() {
        let engine = TemplateEngine::new();

        let page = IndexPage {
            title: "Components".to_string(),
            categories: vec![CategoryView {
                name: "Elements".to_string(),
                id: "elements".to_string(),
                subcategories: vec![SubcategoryView {
                    name: "Buttons".to_string(),
                    id: "elements-buttons".to_string(),
                    sections: vec![SectionCard {
                        name: "Primary".to_string(),
                        href: "/elements/buttons/primary.html#elements-buttons".to_string(),
                        count_label: "1 component".to_string(),
                    }],
                }],
            }],
        };

        let html = engine.render_page("index.html", &page).unwrap();

        assert!(html.contains("<title>Components</title>"));
        assert!(html.contains(r#"id="elements""#));
        assert!(html.contains(r#"href="/elements/buttons/primary.html#elements-buttons""#));
        assert!(html.contains("1 component"));
    }

    #[test]
    fn escapes_interpolated_values() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("section.html", &section_page(vec![component("")]))
            .unwrap();

        assert!(html.contains("Primary &lt;Button&gt;"));
        assert!(!html.contains("Primary <Button>"));
        assert!(html.contains(r#"src="/elements/buttons/primary/1.html""#));
    }

    #[test]
    fn embeds_escaped_source() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page(
                "section.html",
                &section_page(vec![component(r#"<a href="?a=1&b=2">x</a></textarea>"#)]),
            )
            .unwrap();

        assert!(html.contains(
            r#"<textarea class="hidden" data-source-for="abc">&lt;a href="?a=1&amp;b=2">x&lt;/a>&lt;/textarea></textarea>"#
        ));
    }

    #[test]
    fn links_shared_assets() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("section.html", &section_page(vec![]))
            .unwrap();

        assert!(html.contains(r#"<link href="/css/app.css" rel="stylesheet">"#));
        assert!(html.contains(r#"<link href="/css/preview.css" rel="stylesheet">"#));
        assert!(html.contains(r#"<script src="/js/preview.js"></script>"#));
        assert!(html.contains(r#"<a href="/#elements-buttons""#));
    }
}
