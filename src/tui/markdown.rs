use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

fn flush(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

/// Append `text`, starting a new line at every `\n`
fn push_text(
    text: &str,
    style: Style,
    spans: &mut Vec<Span<'static>>,
    lines: &mut Vec<Line<'static>>,
) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            flush(spans, lines);
        }
        if !part.is_empty() {
            spans.push(Span::styled(part.to_string(), style));
        }
    }
}

/// Render chat text as styled lines: `**bold**`, `*italic*`, `code`,
/// bullet and numbered lists, one line per source line break, and a blank
/// line between paragraphs. Anything that reads as HTML is shown verbatim.
pub fn format_message(input: &str, base: Style) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack = vec![base];
    // Next item number per open list; `None` for bullet lists
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(input, options) {
        let current = *style_stack.last().unwrap_or(&base);
        match event {
            Event::Start(tag) => {
                let style = match tag {
                    Tag::Strong => current.add_modifier(Modifier::BOLD),
                    Tag::Emphasis => current.add_modifier(Modifier::ITALIC),
                    Tag::Strikethrough => current.add_modifier(Modifier::CROSSED_OUT),
                    Tag::Paragraph => {
                        if lists.is_empty() && !lines.is_empty() {
                            lines.push(Line::default());
                        }
                        current
                    }
                    Tag::List(start) => {
                        flush(&mut spans, &mut lines);
                        lists.push(start);
                        current
                    }
                    Tag::Item => {
                        spans.push(Span::raw("  ".repeat(lists.len().saturating_sub(1))));
                        let marker = match lists.last_mut() {
                            Some(Some(n)) => {
                                let marker = format!("{}. ", n);
                                *n += 1;
                                marker
                            }
                            _ => "• ".to_string(),
                        };
                        spans.push(Span::styled(marker, Style::default().fg(Color::Yellow)));
                        current
                    }
                    _ => current,
                };
                style_stack.push(style);
            }
            Event::End(tag) => {
                style_stack.pop();
                match tag {
                    TagEnd::Paragraph
                    | TagEnd::Item
                    | TagEnd::Heading(_)
                    | TagEnd::CodeBlock
                    | TagEnd::HtmlBlock => {
                        flush(&mut spans, &mut lines);
                    }
                    TagEnd::List(_) => {
                        lists.pop();
                    }
                    _ => {}
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                push_text(&text, current, &mut spans, &mut lines);
            }
            Event::Code(code) => {
                spans.push(Span::styled(
                    code.to_string(),
                    Style::default().fg(Color::Yellow).bg(Color::Rgb(40, 40, 40)),
                ));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut spans, &mut lines),
            _ => {}
        }
    }

    flush(&mut spans, &mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_bold_and_italic() {
        let lines = format_message("Try **Sarah** or *Michael*", Style::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "Try Sarah or Michael");

        let bold = lines[0].spans.iter().find(|s| s.content == "Sarah").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let italic = lines[0].spans.iter().find(|s| s.content == "Michael").unwrap();
        assert!(italic.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_line_breaks_become_lines() {
        let lines = format_message("first\nsecond\nthird", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_list_items() {
        let lines = format_message("Options:\n\n- one\n- two", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["Options:", "• one", "• two"]);
    }

    #[test]
    fn test_html_like_text_is_kept() {
        let lines = format_message("Email <name> at the office", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["Email <name> at the office"]);

        let lines = format_message("<div>hello</div>", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["<div>hello</div>"]);
    }

    #[test]
    fn test_numbered_list_keeps_numbers() {
        let lines = format_message("Steps:\n\n1. Update profile\n2. Message Sarah", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["Steps:", "1. Update profile", "2. Message Sarah"]);

        let lines = format_message("3. third\n4. fourth", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["3. third", "4. fourth"]);
    }

    #[test]
    fn test_paragraphs_are_separated_by_blank_line() {
        let lines = format_message("para one\n\npara two", Style::default());
        let texts: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(texts, vec!["para one", "", "para two"]);
    }
}
