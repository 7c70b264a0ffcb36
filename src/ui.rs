use ratatui::{prelude::*, widgets::*};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Simple JSON syntax highlighting for the response pane
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_line).collect()
}

fn highlight_line(line: &str) -> Line<'static> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut plain = String::new();
    let mut idx = 0;

    while idx < chars.len() {
        let (pos, c) = chars[idx];
        match c {
            '"' => {
                flush_plain(&mut spans, &mut plain);
                idx += 1;
                while idx < chars.len() {
                    let (_, sc) = chars[idx];
                    if sc == '\\' {
                        idx += 2;
                        continue;
                    }
                    idx += 1;
                    if sc == '"' {
                        break;
                    }
                }
                let end = chars.get(idx).map(|(p, _)| *p).unwrap_or(line.len());
                // a string followed by a colon is a key
                let color = if line[end..].trim_start().starts_with(':') {
                    Color::Cyan
                } else {
                    Color::Green
                };
                spans.push(Span::styled(
                    line[pos..end].to_string(),
                    Style::default().fg(color),
                ));
            }
            '{' | '}' | '[' | ']' => {
                flush_plain(&mut spans, &mut plain);
                spans.push(Span::styled(
                    c.to_string(),
                    Style::default().fg(Color::Yellow),
                ));
                idx += 1;
            }
            c if c.is_ascii_digit() || c == '-' => {
                flush_plain(&mut spans, &mut plain);
                idx += 1;
                while idx < chars.len() {
                    let (_, nc) = chars[idx];
                    if nc.is_ascii_digit() || matches!(nc, '.' | 'e' | 'E' | '+' | '-') {
                        idx += 1;
                    } else {
                        break;
                    }
                }
                let end = chars.get(idx).map(|(p, _)| *p).unwrap_or(line.len());
                spans.push(Span::styled(
                    line[pos..end].to_string(),
                    Style::default().fg(Color::Yellow),
                ));
            }
            _ => {
                let rest = &line[pos..];
                if let Some(keyword) = ["true", "false", "null"]
                    .iter()
                    .find(|k| rest.starts_with(**k))
                {
                    flush_plain(&mut spans, &mut plain);
                    spans.push(Span::styled(
                        keyword.to_string(),
                        Style::default().fg(Color::Magenta),
                    ));
                    idx += keyword.len();
                } else {
                    plain.push(c);
                    idx += 1;
                }
            }
        }
    }

    flush_plain(&mut spans, &mut plain);
    Line::from(spans)
}

fn flush_plain(spans: &mut Vec<Span<'static>>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::raw(std::mem::take(plain)));
    }
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "DELETE" => Color::Red,
        "OPTIONS" => Color::Cyan,
        _ => Color::White,
    }
}
