use crate::domain::model::{FieldValue, ParsedResult};
use crate::view::{ids, Element, View};
use std::f64::consts::PI;

pub const NOT_FOUND: &str = "Not Found";
pub const MISSING_KEYWORDS_TITLE: &str = "Missing Keywords";

/// Geometry of the circular score gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub circumference: f64,
    pub dash_offset: f64,
}

impl Gauge {
    /// Arc for `score` percent. Scores outside 0..=100 are not clamped.
    pub fn new(radius: f64, score: f64) -> Self {
        let circumference = 2.0 * PI * radius;
        Self {
            circumference,
            dash_offset: circumference - (score / 100.0) * circumference,
        }
    }

    pub fn dash_array(&self) -> String {
        format!("{} {}", self.circumference, self.circumference)
    }
}

/// Writes the whole result onto the page, replacing whatever a previous
/// render left behind.
pub fn render(view: &mut View, result: &ParsedResult) {
    let fields = [
        (ids::SUMMARY, &result.profile_summary),
        (ids::REASONING, &result.scoring_reasoning),
        (ids::ROLE, &result.detected_role),
        (ids::NAME, &result.name),
        (ids::EMAIL, &result.email),
        (ids::PHONE, &result.phone),
        (ids::EDUCATION, &result.education),
        (ids::SKILLS, &result.skills),
    ];
    for (id, value) in fields {
        render_field(view, id, value.as_ref());
    }

    render_score(view, result.match_percentage);
    render_missing_keywords(view, result.missing_keywords());
}

/// 清單 -> 項目清單；非空白字串 -> 修剪後文字；其他 -> Not Found
pub fn render_field(view: &mut View, id: &str, value: Option<&FieldValue>) {
    view.update(id, |area| {
        area.clear();
        match value {
            Some(FieldValue::List(items)) if !items.is_empty() => {
                area.append_child(bullet_list(items));
            }
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => {
                area.set_text(text.trim());
            }
            _ => area.set_text(NOT_FOUND),
        }
    });
}

fn render_score(view: &mut View, score: f64) {
    view.update(ids::SCORE_TEXT, |el| el.set_text(&format!("{}%", score)));

    let radius = match view.gauge_radius() {
        Ok(radius) => radius,
        Err(e) => {
            tracing::warn!("Skipping score gauge: {}", e);
            return;
        }
    };

    let gauge = Gauge::new(radius, score);
    view.update(ids::PROGRESS_CIRCLE, |circle| {
        circle.set_style("stroke-dasharray", &gauge.dash_array());
        circle.set_style("stroke-dashoffset", &gauge.dash_offset.to_string());
    });
}

fn render_missing_keywords(view: &mut View, keywords: Option<&[String]>) {
    // 舊卡片一律先移除
    if view.remove(ids::MISSING_KEYWORDS_CARD).is_some() {
        tracing::debug!("Removed previous missing keywords card");
    }

    let Some(keywords) = keywords else {
        return;
    };

    let card = Element::new("div")
        .with_id(ids::MISSING_KEYWORDS_CARD)
        .with_class("result-item")
        .with_child(Element::new("h3").with_text(MISSING_KEYWORDS_TITLE))
        .with_child(bullet_list(keywords));

    match view.results_grid_mut() {
        Some(grid) => grid.append_child(card),
        None => tracing::warn!("Results grid not found, missing keywords card not shown."),
    }
}

fn bullet_list(items: &[String]) -> Element {
    items.iter().fold(Element::new("ul"), |list, item| {
        list.with_child(Element::new("li").with_text(item))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Selector;
    use serde_json::json;

    fn list_items(view: &View, id: &str) -> Vec<String> {
        let mut items = Vec::new();
        collect(view.element(id).unwrap(), &mut items);
        items
    }

    fn collect(el: &Element, out: &mut Vec<String>) {
        for child in &el.children {
            if child.tag == "li" {
                out.push(child.text_content());
            }
            collect(child, out);
        }
    }

    fn text(view: &View, id: &str) -> String {
        view.element(id).unwrap().text_content()
    }

    fn count_cards(view: &View) -> usize {
        let mut cards = Vec::new();
        view.page()
            .find_all(&Selector::id(ids::MISSING_KEYWORDS_CARD), &mut cards);
        cards.len()
    }

    #[test]
    fn test_concrete_scenario() {
        let mut view = View::default();
        let result = ParsedResult::from_json(&json!({
            "name": "Jane Doe",
            "email": "",
            "skills": ["Python", "SQL"],
            "match_percentage": 72,
            "missing_keywords": ["Docker"]
        }));

        render(&mut view, &result);

        assert_eq!(text(&view, ids::NAME), "Jane Doe");
        assert_eq!(text(&view, ids::EMAIL), NOT_FOUND);
        assert_eq!(text(&view, ids::PHONE), NOT_FOUND);
        assert_eq!(list_items(&view, ids::SKILLS), vec!["Python", "SQL"]);
        assert_eq!(text(&view, ids::SCORE_TEXT), "72%");
        assert_eq!(list_items(&view, ids::MISSING_KEYWORDS_CARD), vec!["Docker"]);
        assert_eq!(count_cards(&view), 1);

        let card = view.element(ids::MISSING_KEYWORDS_CARD).unwrap();
        assert!(card.has_class("result-item"));
        assert_eq!(card.children[0].text, MISSING_KEYWORDS_TITLE);
    }

    #[test]
    fn test_strings_are_trimmed_and_blank_is_not_found() {
        let mut view = View::default();
        let result = ParsedResult::from_json(&json!({
            "name": "  Jane Doe \n",
            "phone": "   ",
            "profile_summary": 42
        }));

        render(&mut view, &result);

        assert_eq!(text(&view, ids::NAME), "Jane Doe");
        assert_eq!(text(&view, ids::PHONE), NOT_FOUND);
        assert_eq!(text(&view, ids::SUMMARY), NOT_FOUND);
    }

    #[test]
    fn test_list_items_are_verbatim_including_blank() {
        let mut view = View::default();
        let result = ParsedResult::from_json(&json!({
            "skills": ["Go", "  ", "Rust"],
            "education": []
        }));

        render(&mut view, &result);

        assert_eq!(list_items(&view, ids::SKILLS), vec!["Go", "  ", "Rust"]);
        // 空清單視同缺失
        assert_eq!(text(&view, ids::EDUCATION), NOT_FOUND);
    }

    #[test]
    fn test_string_in_list_field_renders_as_text() {
        let mut view = View::default();
        let result = ParsedResult::from_json(&json!({"education": " B.Tech CS, 2024 "}));

        render(&mut view, &result);

        assert_eq!(text(&view, ids::EDUCATION), "B.Tech CS, 2024");
        assert!(list_items(&view, ids::EDUCATION).is_empty());
    }

    #[test]
    fn test_gauge_geometry() {
        let radius = 54.0;
        let full = Gauge::new(radius, 0.0);
        assert_eq!(full.dash_offset, full.circumference);
        assert_eq!(Gauge::new(radius, 100.0).dash_offset, 0.0);
        let half = Gauge::new(radius, 50.0);
        assert!((half.dash_offset - half.circumference / 2.0).abs() < 1e-9);
        // 超出範圍不截斷
        assert!(Gauge::new(radius, 150.0).dash_offset < 0.0);
    }

    #[test]
    fn test_absent_score_draws_empty_arc() {
        let mut view = View::default();
        render(&mut view, &ParsedResult::default());

        let gauge = Gauge::new(crate::view::DEFAULT_GAUGE_RADIUS, 0.0);
        let circle = view.element(ids::PROGRESS_CIRCLE).unwrap();
        assert_eq!(text(&view, ids::SCORE_TEXT), "0%");
        assert_eq!(
            circle.style_value("stroke-dashoffset"),
            Some(gauge.circumference.to_string().as_str())
        );
        assert_eq!(
            circle.style_value("stroke-dasharray"),
            Some(gauge.dash_array().as_str())
        );
    }

    #[test]
    fn test_half_and_full_scores_set_dashoffset() {
        let radius = crate::view::DEFAULT_GAUGE_RADIUS;
        let mut view = View::default();

        render(&mut view, &ParsedResult::from_json(&json!({"match_percentage": 50})));
        let half = Gauge::new(radius, 50.0);
        let offset = view
            .element(ids::PROGRESS_CIRCLE)
            .and_then(|c| c.style_value("stroke-dashoffset"))
            .unwrap()
            .to_string();
        assert_eq!(text(&view, ids::SCORE_TEXT), "50%");
        assert_eq!(offset, half.dash_offset.to_string());
        let offset: f64 = offset.parse().unwrap();
        assert!((offset - half.circumference / 2.0).abs() < 1e-9);

        render(&mut view, &ParsedResult::from_json(&json!({"match_percentage": 100})));
        let circle = view.element(ids::PROGRESS_CIRCLE).unwrap();
        assert_eq!(text(&view, ids::SCORE_TEXT), "100%");
        assert_eq!(circle.style_value("stroke-dashoffset"), Some("0"));
        assert_eq!(
            circle.style_value("stroke-dasharray"),
            Some(half.dash_array().as_str())
        );
    }

    #[test]
    fn test_quoted_score_fills_gauge() {
        let mut view = View::default();
        render(&mut view, &ParsedResult::from_json(&json!({"match_percentage": "72"})));

        let gauge = Gauge::new(crate::view::DEFAULT_GAUGE_RADIUS, 72.0);
        let circle = view.element(ids::PROGRESS_CIRCLE).unwrap();
        assert_eq!(text(&view, ids::SCORE_TEXT), "72%");
        assert_eq!(
            circle.style_value("stroke-dashoffset"),
            Some(gauge.dash_offset.to_string().as_str())
        );
    }

    #[test]
    fn test_fractional_score_text() {
        let mut view = View::default();
        render(
            &mut view,
            &ParsedResult::from_json(&json!({"match_percentage": 72.5})),
        );
        assert_eq!(text(&view, ids::SCORE_TEXT), "72.5%");
    }

    #[test]
    fn test_rerender_replaces_previous_state() {
        let mut view = View::default();
        let first = ParsedResult::from_json(&json!({
            "skills": ["Python", "SQL"],
            "missing_keywords": ["Docker", "Kubernetes"]
        }));
        let second = ParsedResult::from_json(&json!({
            "skills": ["Rust"],
            "missing_keywords": ["Terraform"]
        }));

        render(&mut view, &first);
        render(&mut view, &second);

        assert_eq!(list_items(&view, ids::SKILLS), vec!["Rust"]);
        assert_eq!(count_cards(&view), 1);
        assert_eq!(list_items(&view, ids::MISSING_KEYWORDS_CARD), vec!["Terraform"]);

        render(&mut view, &ParsedResult::default());
        assert_eq!(count_cards(&view), 0);
        assert_eq!(text(&view, ids::SKILLS), NOT_FOUND);
    }

    #[test]
    fn test_render_is_idempotent() {
        let result = ParsedResult::from_json(&json!({
            "name": "Jane Doe",
            "match_percentage": 64,
            "missing_keywords": ["Docker"]
        }));
        let mut once = View::default();
        render(&mut once, &result);
        let mut twice = View::default();
        render(&mut twice, &result);
        render(&mut twice, &result);

        assert_eq!(once.page(), twice.page());
    }

    #[test]
    fn test_missing_field_area_is_skipped() {
        let mut page = View::default_layout(crate::view::DEFAULT_GAUGE_RADIUS);
        page.remove(&Selector::id(ids::PHONE));
        let mut view = View::bind(page).unwrap();

        render(
            &mut view,
            &ParsedResult::from_json(&json!({"name": "Jane Doe", "phone": "555"})),
        );

        assert!(view.element(ids::PHONE).is_none());
        assert_eq!(text(&view, ids::NAME), "Jane Doe");
    }
}
