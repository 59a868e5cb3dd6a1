use uxaudit::audit::{AuditData, AuditReport, AuditSection, GroundingSource};
use uxaudit::ui::style;

const RULE_WIDTH: usize = 60;

pub fn print_report(url: &str, data: &AuditData) {
    let report = &data.audit;
    println!();
    println!("{}", style::header(format!("UX/UI audit for {url}")));
    println!("{}", style::dim("─".repeat(RULE_WIDTH)));
    println!(
        "Overall score: {}",
        style::score(report.overall_score, AuditReport::MAX_OVERALL_SCORE)
    );
    println!();
    println!("{}", report.summary);

    for section in &report.sections {
        print_section(section);
    }

    print_sources(&data.sources);
}

fn print_section(section: &AuditSection) {
    println!();
    println!(
        "{}  {}",
        style::header(&section.title),
        style::score(section.score, AuditReport::MAX_SECTION_SCORE)
    );
    if !section.explanation.is_empty() {
        println!("  {}", style::dim(&section.explanation));
    }
    for point in &section.positive_points {
        println!("  {} {point}", style::success("+"));
    }
    for item in &section.areas_for_improvement {
        let marker = if item.is_visualizable {
            format!(" {}", style::accent("[visualizable]"))
        } else {
            String::new()
        };
        println!("  {} {}{marker}", style::yellow("-"), item.point);
    }
}

pub fn print_sources(sources: &[GroundingSource]) {
    if sources.is_empty() {
        return;
    }
    println!();
    println!("{}", style::header("Sources"));
    for (index, source) in sources.iter().enumerate() {
        let title = if source.web.title.is_empty() {
            source.web.uri.as_str()
        } else {
            source.web.title.as_str()
        };
        println!("  {}. {title}", index + 1);
        println!("     {}", style::url(&source.web.uri));
    }
}

/// Filesystem-safe stem for an improvement point.
pub fn file_stem(index: usize, point: &str) -> String {
    let mut slug = String::new();
    for c in point.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
        if slug.len() >= 40 {
            break;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        format!("{:02}", index + 1)
    } else {
        format!("{:02}-{slug}", index + 1)
    }
}
