//! Template rendering with Tera

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Base first so the pages can extend it
        tera.add_raw_template("base.html", include_str!("../templates/base.html"))?;

        tera.add_raw_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
        tera.add_raw_template("list.html", include_str!("../templates/list.html"))?;
        tera.add_raw_template("detail.html", include_str!("../templates/detail.html"))?;

        Ok(Self { tera })
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        let templates = Templates::new().unwrap();
        let mut ctx = Context::new();
        ctx.insert("instance_name", "Console");
        let html = templates.render_with_context("dashboard.html", &ctx).unwrap();
        assert!(html.contains("Console"));
        assert!(html.contains("/entidades"));
    }
}
