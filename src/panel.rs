use crate::error::{Error, Result};
use crate::stats::UserProfile;
use crate::terminal::Layout;
use clap::ValueEnum;
use colored::{Color, ColoredString, Colorize};
use serde_json::Value;
use std::fmt::Display;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BLOCK: &str = "███";
const RESET: &str = "\x1b[0m";

/// Label colour chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HighlightColor {
    Red,
    Green,
    Yellow,
    #[default]
    Blue,
    Magenta,
    Cyan,
}

impl HighlightColor {
    fn color(self) -> Color {
        match self {
            HighlightColor::Red => Color::Red,
            HighlightColor::Green => Color::Green,
            HighlightColor::Yellow => Color::Yellow,
            HighlightColor::Blue => Color::Blue,
            HighlightColor::Magenta => Color::Magenta,
            HighlightColor::Cyan => Color::Cyan,
        }
    }

    /// Colour name as understood by terminal style templates.
    pub fn name(self) -> &'static str {
        match self {
            HighlightColor::Red => "red",
            HighlightColor::Green => "green",
            HighlightColor::Yellow => "yellow",
            HighlightColor::Blue => "blue",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Cyan => "cyan",
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        text.color(self.color())
    }
}

/// Extra key/value rows supplied through `--profile`, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraFields(Vec<(String, String)>);

impl ExtraFields {
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| Error::InvalidProfile(e.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(Error::InvalidProfile(format!("got `{other}`"))),
        };

        let mut fields: Vec<(String, String)> = map
            .into_iter()
            .map(|(k, v)| {
                let shown = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, shown)
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self(fields))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub color: HighlightColor,
    pub extra: ExtraFields,
}

/// Full two-pane output: avatar on the left, statistics on the right. The
/// statistics pane is wrapped to half the terminal width.
pub fn render(
    art: &str,
    login: &str,
    profile: &UserProfile,
    config: &RenderConfig,
    layout: &Layout,
) -> String {
    let stats = stats_lines(login, profile, config)
        .iter()
        .flat_map(|line| wrap_line(line, layout.pane_width))
        .collect::<Vec<_>>()
        .join("\n");
    join_horizontal(art, layout.canvas.width as usize, &stats)
}

fn stats_lines(login: &str, profile: &UserProfile, config: &RenderConfig) -> Vec<String> {
    let color = config.color;
    let mut lines = vec![
        row(color, "User", login),
        separator(color, login),
        row(color, "Name", &profile.name),
        row(color, "Repos", profile.repos),
        row(color, "Followers", profile.followers),
        row(color, "Following", profile.following),
        row(color, "Total Stars Earned", profile.stars),
        row(color, "Total Commits This Year", profile.commits_this_year),
        row(color, "Total PRs", profile.pull_requests),
        row(color, "Total Issues", profile.issues),
    ];

    for (key, value) in config.extra.iter() {
        lines.push(row(color, key, value));
    }

    lines.push(separator(color, login));
    lines.push(palette());
    lines
}

fn row(color: HighlightColor, label: &str, value: impl Display) -> String {
    format!("  {}: {value}", color.paint(label))
}

/// Dashes under the `User: <login>` row, six wider than the login.
fn separator(color: HighlightColor, login: &str) -> String {
    let dashes = "-".repeat(6 + login.chars().count());
    color.paint(&format!("  {dashes}")).to_string()
}

fn palette() -> String {
    [
        BLOCK.normal(),
        BLOCK.red(),
        BLOCK.green(),
        BLOCK.yellow(),
        BLOCK.blue(),
        BLOCK.magenta(),
        BLOCK.cyan(),
        BLOCK.white(),
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Places `right` beside `left`, padding every left line to `left_width`
/// and centring the shorter block vertically.
pub fn join_horizontal(left: &str, left_width: usize, right: &str) -> String {
    let left: Vec<&str> = left.lines().collect();
    let right: Vec<&str> = right.lines().collect();
    let height = left.len().max(right.len());
    let left_top = (height - left.len()) / 2;
    let right_top = (height - right.len()) / 2;

    let line_at = |lines: &[&str], top: usize, i: usize| -> String {
        i.checked_sub(top)
            .and_then(|j| lines.get(j))
            .map(|s| s.to_string())
            .unwrap_or_default()
    };

    (0..height)
        .map(|i| {
            let l = line_at(&left, left_top, i);
            let r = line_at(&right, right_top, i);
            let pad = left_width.saturating_sub(visible_width(&l));
            format!("{l}{}{r}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display width of `s` once ANSI escape sequences are removed.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub fn strip_ansi(s: &str) -> String {
    strip_ansi_escapes::strip_str(s)
}

/// Hard-wraps `line` so no piece is wider than `width` columns. SGR
/// sequences take no room; a colour still open at a break is reset at the
/// end of the piece and reopened at the start of the next one.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || visible_width(line) <= width {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    let mut active: Option<String> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            let mut seq = String::from(c);
            for c in chars.by_ref() {
                seq.push(c);
                if c != '[' && ('@'..='~').contains(&c) {
                    break;
                }
            }
            active = if seq == RESET || seq == "\x1b[m" {
                None
            } else {
                Some(seq.clone())
            };
            current.push_str(&seq);
            continue;
        }

        let w = c.width().unwrap_or(0);
        if used > 0 && used + w > width {
            if active.is_some() {
                current.push_str(RESET);
            }
            pieces.push(std::mem::take(&mut current));
            used = 0;
            if let Some(seq) = &active {
                current.push_str(seq);
            }
        }
        current.push(c);
        used += w;
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Canvas;

    fn octocat() -> UserProfile {
        UserProfile {
            name: "The Octocat".into(),
            repos: 120,
            followers: 42,
            following: 7,
            stars: 5300,
            commits_this_year: 321,
            pull_requests: 12,
            issues: 3,
        }
    }

    fn plain_lines(out: &str) -> Vec<String> {
        strip_ansi(out)
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect()
    }

    #[test]
    fn stats_pane_lists_every_field() {
        let lines: Vec<String> = stats_lines("octocat", &octocat(), &RenderConfig::default())
            .iter()
            .map(|l| strip_ansi(l))
            .collect();

        assert_eq!(lines[0], "  User: octocat");
        assert_eq!(lines[1], format!("  {}", "-".repeat(13)));
        assert_eq!(lines[2], "  Name: The Octocat");
        assert_eq!(lines[3], "  Repos: 120");
        assert_eq!(lines[4], "  Followers: 42");
        assert_eq!(lines[5], "  Following: 7");
        assert_eq!(lines[6], "  Total Stars Earned: 5300");
        assert_eq!(lines[7], "  Total Commits This Year: 321");
        assert_eq!(lines[8], "  Total PRs: 12");
        assert_eq!(lines[9], "  Total Issues: 3");
        assert_eq!(lines[10], lines[1]);
        assert_eq!(lines[11], BLOCK.repeat(8));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn extra_fields_follow_stats_sorted_by_key() {
        let config = RenderConfig {
            color: HighlightColor::Cyan,
            extra: ExtraFields::parse(r#"{"Editor": "vim", "Company": "GitHub", "Age": 17}"#)
                .unwrap(),
        };
        let lines: Vec<String> = stats_lines("octocat", &octocat(), &config)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();

        assert_eq!(lines[10], "  Age: 17");
        assert_eq!(lines[11], "  Company: GitHub");
        assert_eq!(lines[12], "  Editor: vim");
        assert_eq!(lines[13], format!("  {}", "-".repeat(13)));
    }

    #[test]
    fn invalid_profile_json_is_rejected() {
        assert!(matches!(
            ExtraFields::parse("{not json"),
            Err(Error::InvalidProfile(_))
        ));
        assert!(matches!(
            ExtraFields::parse("[1, 2]"),
            Err(Error::InvalidProfile(_))
        ));
        assert!(matches!(
            ExtraFields::parse("\"text\""),
            Err(Error::InvalidProfile(_))
        ));
    }

    #[test]
    fn empty_object_adds_nothing() {
        assert_eq!(ExtraFields::parse("{}").unwrap().iter().count(), 0);
    }

    #[test]
    fn join_pads_left_and_centres_shorter_pane() {
        let out = join_horizontal("ab\ncd\nef", 3, "x");
        assert_eq!(out, "ab \ncd x\nef ");

        let out = join_horizontal("a", 2, "1\n2\n3");
        assert_eq!(out, "  1\na 2\n  3");
    }

    #[test]
    fn join_ignores_escape_codes_when_padding() {
        let left = "\x1b[31m#\x1b[0m";
        let out = join_horizontal(left, 3, "r");
        assert_eq!(strip_ansi(&out), "#  r");
    }

    #[test]
    fn strip_ansi_removes_sgr_sequences() {
        assert_eq!(strip_ansi("\x1b[38;2;1;2;3m@\x1b[0m."), "@.");
        assert_eq!(visible_width("\x1b[34mUser\x1b[0m"), 4);
    }

    #[test]
    fn strip_ansi_removes_hyperlinks() {
        let link = "\x1b]8;;https://github.com/octocat\x1b\\octocat\x1b]8;;\x1b\\";
        assert_eq!(strip_ansi(link), "octocat");
    }

    #[test]
    fn wrap_keeps_short_lines_whole() {
        assert_eq!(wrap_line("  Repos: 120", 30), vec!["  Repos: 120"]);
        assert_eq!(wrap_line("anything", 0), vec!["anything"]);
    }

    #[test]
    fn wrap_splits_by_display_width() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn wrap_reopens_colour_after_break() {
        let pieces = wrap_line("\x1b[34mabcdef\x1b[0m", 4);
        assert_eq!(
            pieces,
            vec!["\x1b[34mabcd\x1b[0m", "\x1b[34mef\x1b[0m"]
        );
    }

    #[test]
    fn stats_pane_stays_within_half_the_terminal() {
        let bio = "Building tools for developers who like their terminal colourful and fast";
        let config = RenderConfig {
            color: HighlightColor::Green,
            extra: ExtraFields::parse(&format!(r#"{{"Bio": "{bio}"}}"#)).unwrap(),
        };
        let layout = Layout::from_columns(60);
        assert_eq!(layout.pane_width, 30);
        let art = vec!["@".repeat(30); 15].join("\n");

        let out = render(&art, "octocat", &octocat(), &config, &layout);
        let rights: Vec<String> = plain_lines(&out)
            .iter()
            .map(|l| l.chars().skip(30).collect())
            .collect();

        for right in &rights {
            assert!(right.width() <= 30, "too wide: {right:?}");
        }
        assert!(rights.iter().any(|r| r.starts_with("  Bio: Building")));
        assert_eq!(rights.concat().matches("fast").count(), 1);
    }

    #[test]
    fn render_places_art_beside_stats() {
        let art = "@@@@\n####";
        let layout = Layout {
            columns: 120,
            pane_width: 60,
            canvas: Canvas {
                width: 4,
                height: 2,
            },
        };
        let out = render(art, "octocat", &octocat(), &RenderConfig::default(), &layout);
        let lines = plain_lines(&out);

        // 12 stat rows, the 2 art rows sit in rows 5 and 6.
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "      User: octocat");
        assert_eq!(lines[5], "@@@@  Following: 7");
        assert_eq!(lines[6], "####  Total Stars Earned: 5300");
    }
}
