//! Template engine for the generated Swift files.

use crate::config::CodegenConfig;
use crate::error::{CodegenError, Result};
use crate::naming::{indent, swift_string};
use crate::view_state::ViewState;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

const VIEW_TEMPLATE: &str = r#"import SwiftUI

struct {{name}}View: View {
{{#if navigation_shell}}
    @StateObject private var navigationState = VeloNavigationState(title: {{title}}, hasSearchBar: false)
{{/if}}
    @StateObject private var viewModel = {{name}}ViewModel()
{{#if register_fonts}}

    init() {
        VeloFont.registerFonts()
    }
{{/if}}

    var body: some View {
{{indent body 8}}
        .padding(.sm)
        .ignoresSafeArea(edges: .bottom)
{{#if max_width}}
        .frame(maxWidth: {{max_width}})
{{/if}}
{{#if navigation_shell}}
        .environmentObject(navigationState)
{{/if}}
    }
}

#Preview {
    {{name}}View()
}
"#;

const VIEW_MODEL_TEMPLATE: &str = r#"import SwiftUI

class {{name}}ViewModel: ObservableObject {
    @Published var title: String = {{title}}
{{#if state}}
{{indent state 4}}
{{/if}}
{{#if has_segments}}

    init() {
        self.selectedSegment = segmentData.first
    }
{{/if}}
}
"#;

/// Template engine using Handlebars.
///
/// Output is Swift source, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with the view and view-model templates registered.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self::register_helpers(&mut handlebars);

        let mut engine = Self { handlebars };
        engine.register_template("view", VIEW_TEMPLATE)?;
        engine.register_template("view_model", VIEW_MODEL_TEMPLATE)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Render the view file around an emitted body.
    pub fn render_view(
        &self,
        type_name: &str,
        title: &str,
        body: &str,
        config: &CodegenConfig,
    ) -> Result<String> {
        self.render(
            "view",
            &json!({
                "name": type_name,
                "title": swift_string(title),
                "body": body,
                "navigation_shell": config.navigation_shell,
                "register_fonts": config.register_fonts,
                "max_width": config.max_width,
            }),
        )
    }

    /// Render the view-model file from the collected state.
    pub fn render_view_model(&self, type_name: &str, title: &str, state: &ViewState) -> Result<String> {
        self.render(
            "view_model",
            &json!({
                "name": type_name,
                "title": swift_string(title),
                "state": state.render(),
                "has_segments": state.has_segments(),
            }),
        )
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // {{indent text spaces}}
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
                    let spaces = h.param(1).and_then(|v| v.value().as_u64()).unwrap_or(4) as usize;
                    out.write(&indent(content, spaces))?;
                    Ok(())
                },
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_wraps_body() {
        let engine = TemplateEngine::new().unwrap();
        let view = engine
            .render_view("Home", "Home", "ScrollView {\n}", &CodegenConfig::default())
            .unwrap();

        assert!(view.starts_with("import SwiftUI\n\nstruct HomeView: View {\n"));
        assert!(view.contains("VeloNavigationState(title: \"Home\", hasSearchBar: false)"));
        assert!(view.contains("        ScrollView {\n        }\n        .padding(.sm)"));
        assert!(view.contains(".frame(maxWidth: 600)"));
        assert!(view.contains("VeloFont.registerFonts()"));
        assert!(view.contains("#Preview {\n    HomeView()\n}"));
    }

    #[test]
    fn test_view_without_shell() {
        let engine = TemplateEngine::new().unwrap();
        let config = CodegenConfig {
            navigation_shell: false,
            register_fonts: false,
            max_width: None,
            ..CodegenConfig::default()
        };
        let view = engine.render_view("Home", "Home", "Text(\"x\")", &config).unwrap();

        assert!(!view.contains("navigationState"));
        assert!(!view.contains("registerFonts"));
        assert!(!view.contains("maxWidth"));
    }

    #[test]
    fn test_titles_are_not_html_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let view = engine
            .render_view("SignIn", "Sign <In> & \"Go\"", "", &CodegenConfig::default())
            .unwrap();
        assert!(view.contains("title: \"Sign <In> & \\\"Go\\\"\""));
    }

    #[test]
    fn test_view_model_with_segments() {
        let engine = TemplateEngine::new().unwrap();
        let mut state = ViewState::new();
        state.set_segments(vec!["Day".into()]);

        let model = engine.render_view_model("Home", "Home", &state).unwrap();
        assert!(model.contains("class HomeViewModel: ObservableObject {"));
        assert!(model.contains("    @Published var title: String = \"Home\""));
        assert!(model.contains("    @Published var segmentData: [String] = [\"Day\"]"));
        assert!(model.contains("self.selectedSegment = segmentData.first"));
    }

    #[test]
    fn test_view_model_without_segments_has_no_init() {
        let engine = TemplateEngine::new().unwrap();
        let model = engine.render_view_model("Home", "Home", &ViewState::new()).unwrap();
        assert!(!model.contains("init()"));
        assert!(!model.contains("segmentData"));
    }
}
