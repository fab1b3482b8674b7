use crate::view::{ids, Element, View};

const GAUGE_WIDTH: usize = 30;

const FIELDS: [(&str, &str); 8] = [
    ("Name", ids::NAME),
    ("Email", ids::EMAIL),
    ("Phone", ids::PHONE),
    ("Detected Role", ids::ROLE),
    ("Profile Summary", ids::SUMMARY),
    ("Scoring Reasoning", ids::REASONING),
    ("Education", ids::EDUCATION),
    ("Skills", ids::SKILLS),
];

/// Prints the rendered page as a plain-text dashboard.
pub fn render_dashboard(view: &View) -> String {
    let mut out = String::new();

    let file_name = view.file_name();
    if !file_name.is_empty() {
        out.push_str(&format!("📄 {}\n", file_name));
    }

    let score_text = view
        .element(ids::SCORE_TEXT)
        .map(Element::text_content)
        .unwrap_or_default();
    out.push_str(&format!("ATS Score: {} {}\n", score_text, gauge_bar(view)));

    for (title, id) in FIELDS {
        if let Some(area) = view.element(id) {
            write_section(&mut out, title, area);
        }
    }

    if let Some(card) = view.element(ids::MISSING_KEYWORDS_CARD) {
        let title = card
            .children
            .iter()
            .find(|c| c.tag == "h3")
            .map(Element::text_content)
            .unwrap_or_default();
        write_section(&mut out, &title, card);
    }

    out
}

fn write_section(out: &mut String, title: &str, area: &Element) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');

    let list_items = list_items(area);
    if list_items.is_empty() {
        out.push_str(&format!("  {}\n", area.text));
    } else {
        for item in list_items {
            out.push_str(&format!("  • {}\n", item));
        }
    }
}

fn list_items(area: &Element) -> Vec<String> {
    let mut items = Vec::new();
    collect_list_items(area, &mut items);
    items
}

fn collect_list_items(element: &Element, out: &mut Vec<String>) {
    for child in &element.children {
        if child.tag == "li" {
            out.push(child.text_content());
        } else {
            collect_list_items(child, out);
        }
    }
}

// 以 dashoffset 推回填滿比例，與 SVG 顯示一致
fn gauge_bar(view: &View) -> String {
    let Some(circle) = view.element(ids::PROGRESS_CIRCLE) else {
        return String::new();
    };
    let Ok(radius) = view.gauge_radius() else {
        return String::new();
    };
    let Some(offset) = circle
        .style_value("stroke-dashoffset")
        .and_then(|v| v.parse::<f64>().ok())
    else {
        return format!("[{}]", "·".repeat(GAUGE_WIDTH));
    };

    let circumference = 2.0 * std::f64::consts::PI * radius;
    let fraction = if circumference > 0.0 {
        ((circumference - offset) / circumference).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "·".repeat(GAUGE_WIDTH - filled)
    )
}
