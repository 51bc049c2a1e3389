//! Markdown to styled terminal text
//!
//! Line-oriented: headings, list markers, quotes, fenced code, and inline
//! `**bold**` are styled; everything else is printed as written.

use crate::ui::session::Theme;
use colored::{Color, Colorize};

struct Palette {
    heading: Color,
    bullet: Color,
    quote: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            heading: Color::Blue,
            bullet: Color::Magenta,
            quote: Color::Green,
        },
        Theme::Dark => Palette {
            heading: Color::BrightCyan,
            bullet: Color::BrightYellow,
            quote: Color::BrightGreen,
        },
    }
}

/// Render markdown for display in a terminal
pub fn render_markdown(markdown: &str, theme: Theme) -> String {
    let palette = palette(theme);
    let mut in_code_block = false;
    let mut lines = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            lines.push(line.dimmed().to_string());
            continue;
        }

        if in_code_block {
            lines.push(line.dimmed().to_string());
            continue;
        }

        lines.push(render_line(line, trimmed, &palette));
    }

    lines.join("\n")
}

fn render_line(line: &str, trimmed: &str, palette: &Palette) -> String {
    if let Some(title) = heading_text(trimmed) {
        return title.color(palette.heading).bold().to_string();
    }

    if let Some(rest) = trimmed.strip_prefix("> ") {
        return format!("{} {}", "│".color(palette.quote), render_inline(rest).italic());
    }

    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            let indent = &line[..line.len() - trimmed.len()];
            return format!("{}{} {}", indent, "•".color(palette.bullet), render_inline(rest));
        }
    }

    render_inline(line)
}

/// Heading text without the leading `#`s, if the line is an ATX heading
fn heading_text(trimmed: &str) -> Option<&str> {
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &trimmed[hashes..];
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(' ').map(str::trim)
}

/// Style `**bold**` spans; unmatched markers are left as written
fn render_inline(text: &str) -> String {
    let mut rendered = String::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find("**") {
            Some(end) if end > 0 => {
                rendered.push_str(&rest[..start]);
                rendered.push_str(&after[..end].bold().to_string());
                rest = &after[end + 2..];
            }
            _ => break,
        }
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(markdown: &str) -> String {
        colored::control::set_override(false);
        render_markdown(markdown, Theme::Light)
    }

    #[test]
    fn test_headings_lose_markers() {
        assert_eq!(plain("# Title\n### Sub"), "Title\nSub");
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        assert_eq!(plain("#hashtag"), "#hashtag");
    }

    #[test]
    fn test_bullets_keep_indent() {
        assert_eq!(plain("- one\n  * two"), "• one\n  • two");
    }

    #[test]
    fn test_bold_markers_removed() {
        assert_eq!(plain("a **b** c **d"), "a b c **d");
    }

    #[test]
    fn test_code_block_left_verbatim() {
        assert_eq!(plain("```\n# not heading\n```"), "```\n# not heading\n```");
    }

    #[test]
    fn test_quote() {
        assert_eq!(plain("> quoted"), "│ quoted");
    }

    #[test]
    fn test_dark_theme_renders_same_text() {
        colored::control::set_override(false);
        assert_eq!(render_markdown("## A\n- b", Theme::Dark), "A\n• b");
    }
}
