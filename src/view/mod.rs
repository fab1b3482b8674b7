pub mod document;
pub mod text;

use crate::utils::error::{DashError, Result};
pub use document::{Element, Selector};

/// Fixed identifiers of the addressable page elements.
pub mod ids {
    pub const FORM: &str = "upload-form";
    pub const FILE_INPUT: &str = "resume";
    pub const JOB_DESCRIPTION: &str = "job-description";
    pub const DROP_ZONE: &str = "drop-zone";
    pub const FILE_NAME: &str = "file-name";
    pub const LOADER: &str = "loader";
    pub const RESULTS_CONTAINER: &str = "results-container";
    pub const RESULTS_GRID_CLASS: &str = "results-grid";

    pub const SUMMARY: &str = "result-summary";
    pub const REASONING: &str = "result-reasoning";
    pub const NAME: &str = "result-name";
    pub const EMAIL: &str = "result-email";
    pub const PHONE: &str = "result-phone";
    pub const EDUCATION: &str = "result-education";
    pub const SKILLS: &str = "result-skills";
    pub const ROLE: &str = "result-role";

    pub const SCORE_TEXT: &str = "result-ats-score";
    pub const PROGRESS_CIRCLE: &str = "ats-progress-circle";
    pub const MISSING_KEYWORDS_CARD: &str = "missing-keywords-card";

    /// Elements every submission cycle depends on; field areas are optional.
    pub const REQUIRED: [&str; 9] = [
        FORM,
        FILE_INPUT,
        JOB_DESCRIPTION,
        DROP_ZONE,
        FILE_NAME,
        LOADER,
        RESULTS_CONTAINER,
        SCORE_TEXT,
        PROGRESS_CIRCLE,
    ];
}

pub const DEFAULT_GAUGE_RADIUS: f64 = 54.0;

/// 頁面控制代碼：建立一次後傳給每個元件，取代散落各處的全域查找
#[derive(Debug, Clone)]
pub struct View {
    page: Element,
    results_grid: Selector,
}

impl View {
    /// Binds a page, checking up front that every required element exists.
    pub fn bind(page: Element) -> Result<Self> {
        for id in ids::REQUIRED {
            if page.find(&Selector::id(id)).is_none() {
                return Err(DashError::MissingElement { id: id.to_string() });
            }
        }

        let results_grid = Selector::class(ids::RESULTS_GRID_CLASS);
        if page.find(&results_grid).is_none() {
            return Err(DashError::MissingElement {
                id: results_grid.to_string(),
            });
        }

        let view = Self { page, results_grid };
        // 進度圓必須有可讀的半徑
        view.gauge_radius()?;
        Ok(view)
    }

    /// The dashboard layout served by the parsing backend's index page.
    pub fn default_layout(gauge_radius: f64) -> Element {
        let card = |title: &str, id: &str| {
            Element::new("div")
                .with_class("result-item")
                .with_child(Element::new("h3").with_text(title))
                .with_child(Element::new("div").with_id(id))
        };

        let upload_form = Element::new("form")
            .with_id(ids::FORM)
            .with_child(
                Element::new("div")
                    .with_id(ids::DROP_ZONE)
                    .with_class("drop-zone")
                    .with_child(
                        Element::new("input")
                            .with_id(ids::FILE_INPUT)
                            .with_attribute("type", "file")
                            .with_attribute("accept", ".pdf"),
                    )
                    .with_child(Element::new("p").with_id(ids::FILE_NAME)),
            )
            .with_child(
                Element::new("textarea")
                    .with_id(ids::JOB_DESCRIPTION)
                    .with_attribute("value", ""),
            );

        let score_card = Element::new("div")
            .with_class("result-item")
            .with_class("score-card")
            .with_child(Element::new("h3").with_text("ATS Score"))
            .with_child(
                Element::new("svg").with_child(
                    Element::new("circle")
                        .with_id(ids::PROGRESS_CIRCLE)
                        .with_attribute("r", &gauge_radius.to_string()),
                ),
            )
            .with_child(Element::new("span").with_id(ids::SCORE_TEXT).with_text("0%"));

        let grid = Element::new("div")
            .with_class(ids::RESULTS_GRID_CLASS)
            .with_child(score_card)
            .with_child(card("Profile Summary", ids::SUMMARY))
            .with_child(card("Scoring Reasoning", ids::REASONING))
            .with_child(card("Detected Role", ids::ROLE))
            .with_child(card("Name", ids::NAME))
            .with_child(card("Email", ids::EMAIL))
            .with_child(card("Phone", ids::PHONE))
            .with_child(card("Education", ids::EDUCATION))
            .with_child(card("Skills", ids::SKILLS));

        Element::new("main")
            .with_child(upload_form)
            .with_child(
                Element::new("div")
                    .with_id(ids::LOADER)
                    .with_class("loader")
                    .with_style("display", "none"),
            )
            .with_child(
                Element::new("div")
                    .with_id(ids::RESULTS_CONTAINER)
                    .with_style("display", "block")
                    .with_child(grid),
            )
    }

    pub fn page(&self) -> &Element {
        &self.page
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.page.find(&Selector::id(id))
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.page.find_mut(&Selector::id(id))
    }

    /// Applies `f` to the element, or logs a warning and skips it when absent.
    pub fn update<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Element),
    {
        match self.element_mut(id) {
            Some(element) => {
                f(element);
                true
            }
            None => {
                tracing::warn!("Element with ID '{}' not found.", id);
                false
            }
        }
    }

    pub fn results_grid(&self) -> Option<&Element> {
        self.page.find(&self.results_grid)
    }

    pub fn results_grid_mut(&mut self) -> Option<&mut Element> {
        self.page.find_mut(&self.results_grid)
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.page.remove(&Selector::id(id))
    }

    pub fn gauge_radius(&self) -> Result<f64> {
        let raw = self
            .element(ids::PROGRESS_CIRCLE)
            .and_then(|circle| circle.attribute("r"))
            .ok_or_else(|| DashError::MissingElement {
                id: format!("{}[r]", ids::PROGRESS_CIRCLE),
            })?;

        raw.trim()
            .parse::<f64>()
            .map_err(|e| DashError::InvalidConfigValueError {
                field: format!("{}.r", ids::PROGRESS_CIRCLE),
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// 目前在工作描述輸入框中的文字
    pub fn job_description(&self) -> String {
        self.element(ids::JOB_DESCRIPTION)
            .and_then(|el| el.attribute("value"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_job_description(&mut self, text: &str) {
        self.update(ids::JOB_DESCRIPTION, |el| el.set_attribute("value", text));
    }

    pub fn file_name(&self) -> String {
        self.element(ids::FILE_NAME)
            .map(Element::text_content)
            .unwrap_or_default()
    }

    pub fn is_displayed(&self, id: &str) -> bool {
        self.element(id).is_some_and(Element::is_displayed)
    }
}

impl Default for View {
    fn default() -> Self {
        Self {
            page: Self::default_layout(DEFAULT_GAUGE_RADIUS),
            results_grid: Selector::class(ids::RESULTS_GRID_CLASS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_binds() {
        let view = View::bind(View::default_layout(40.0)).unwrap();
        assert_eq!(view.gauge_radius().unwrap(), 40.0);
        assert!(view.is_displayed(ids::RESULTS_CONTAINER));
        assert!(!view.is_displayed(ids::LOADER));
        assert!(view.results_grid().is_some());
    }

    #[test]
    fn test_bind_rejects_missing_required_element() {
        let mut page = View::default_layout(DEFAULT_GAUGE_RADIUS);
        page.remove(&Selector::id(ids::LOADER));

        let err = View::bind(page).unwrap_err();
        assert!(matches!(err, DashError::MissingElement { ref id } if id == ids::LOADER));
    }

    #[test]
    fn test_bind_rejects_unreadable_radius() {
        let mut page = View::default_layout(DEFAULT_GAUGE_RADIUS);
        page.find_mut(&Selector::id(ids::PROGRESS_CIRCLE))
            .unwrap()
            .set_attribute("r", "wide");

        assert!(View::bind(page).is_err());
    }

    #[test]
    fn test_update_missing_element_is_skipped() {
        let mut view = View::default();
        let mut called = false;
        assert!(!view.update("no-such-element", |_| called = true));
        assert!(!called);
    }

    #[test]
    fn test_job_description_round_trip() {
        let mut view = View::default();
        assert_eq!(view.job_description(), "");
        view.set_job_description("Senior Rust engineer");
        assert_eq!(view.job_description(), "Senior Rust engineer");
    }
}
