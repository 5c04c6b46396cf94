use crate::loader::LoadReport;
use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::BEER, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    if is_quiet() {
        return;
    }
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

/// Banner in front of one request's JSON result
pub fn request(title: &str, mutation: bool) {
    if is_quiet() {
        return;
    }
    let (icon, style) = if mutation {
        (Icons::PENCIL, theme().mutation.clone())
    } else {
        (Icons::MAG, theme().read.clone())
    };
    println!();
    println!("{} {}", icon, title.style(style));
}

/// One line per integrity violation, always shown
pub fn problem(text: &str) {
    eprintln!("  {} {}", "-".style(theme().dim.clone()), text.style(theme().warn.clone()));
}

/// What a bulk load kept and what it had to drop
pub fn load_summary(report: &LoadReport) {
    if is_quiet() {
        return;
    }
    success(&format!(
        "Loaded {} breweries, {} beers, {} users, {} reviews",
        report.breweries, report.beers, report.users, report.reviews
    ));
    if report.unlinked_beers > 0 {
        warn(&format!("{} beer(s) reference a missing brewery", report.unlinked_beers));
    }
    if report.skipped_reviews > 0 {
        warn(&format!("{} review(s) skipped: beer or user missing", report.skipped_reviews));
    }
}
