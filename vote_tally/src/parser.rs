use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use uuid::Uuid;

use crate::model::Candidate;

/// Class name assigned by the fallback branch when a line carries a
/// separator but no parenthesized class.
pub const UNKNOWN_CLASS: &str = "未知班级";

lazy_static! {
    // <department> <dash> <name> (<class>), lazy groups, ASCII or
    // fullwidth parentheses.
    static ref LINE_RX: Regex =
        Regex::new(r"^\s*(.+?)\s*[-–—]\s*(.+?)\s*[(（](.+?)[)）]\s*$").unwrap();
    static ref DASH_RX: Regex = Regex::new(r"[-–—]").unwrap();
}

/// Parses a plaintext roster, one candidate per line:
/// `<department> - <name> (<class>)`.
///
/// Lines that fit neither the primary nor the fallback pattern are
/// dropped without raising an error. Hand-typed rosters are expected to
/// contain the occasional bad line, and partial success is preferred
/// over an all-or-nothing failure. An empty result is a valid outcome
/// here; callers decide whether it is acceptable.
pub fn parse_roster(text: &str) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        match parse_line(line) {
            Some(c) => candidates.push(c),
            None => {
                debug!("parse_roster: dropping unparseable line {:?}", line);
            }
        }
    }
    debug!(
        "parse_roster: parsed {} candidates from input",
        candidates.len()
    );
    candidates
}

fn parse_line(line: &str) -> Option<Candidate> {
    if let Some(caps) = LINE_RX.captures(line) {
        let department = caps[1].trim();
        let name = caps[2].trim();
        let class_name = caps[3].trim();
        // A capture that trims to nothing does not make a candidate.
        if !department.is_empty() && !name.is_empty() && !class_name.is_empty() {
            return Some(new_candidate(department, name, class_name));
        }
    }

    // Fallback: dash-separated but without a class in parentheses.
    let segments: Vec<&str> = DASH_RX
        .split(line)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [department, name, ..] => Some(new_candidate(department, name, UNKNOWN_CLASS)),
        _ => None,
    }
}

fn new_candidate(department: &str, name: &str, class_name: &str) -> Candidate {
    Candidate {
        // Unique within the session; nothing is promised across
        // process restarts.
        id: Uuid::new_v4().to_string(),
        department: department.to_string(),
        name: name.to_string(),
        class_name: class_name.to_string(),
        votes: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_pattern() {
        let cs = parse_roster("学习部 - 张三 (高二1班)");
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].department, "学习部");
        assert_eq!(cs[0].name, "张三");
        assert_eq!(cs[0].class_name, "高二1班");
        assert_eq!(cs[0].votes, 0);
    }

    #[test]
    fn separator_and_parenthesis_variants() {
        let text = "学习部 – 张三 (高二1班)\n文体部 — 王五（高一2班）\n宣传部-钱七(高二2班)";
        let cs = parse_roster(text);
        assert_eq!(cs.len(), 3);
        assert_eq!(cs[1].name, "王五");
        assert_eq!(cs[1].class_name, "高一2班");
        assert_eq!(cs[2].department, "宣传部");
    }

    #[test]
    fn fallback_without_class() {
        let cs = parse_roster("学习部 - 张三");
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].department, "学习部");
        assert_eq!(cs[0].name, "张三");
        assert_eq!(cs[0].class_name, UNKNOWN_CLASS);
    }

    #[test]
    fn unparseable_lines_are_dropped() {
        let text = "学习部 - 张三 (高二1班)\nnot a candidate line\n学习部 - 李四 (高二3班)";
        let cs = parse_roster(text);
        assert_eq!(cs.len(), 2);
        assert_eq!(cs[1].name, "李四");
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("   \n  \n").is_empty());
    }

    #[test]
    fn whitespace_only_department_does_not_count() {
        // A dash with an empty department side leaves a single segment.
        assert!(parse_roster(" - 张三 (高二1班)").is_empty());
    }

    #[test]
    fn whitespace_only_class_falls_back() {
        let cs = parse_roster("学习部 - 张三 (  )");
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].class_name, UNKNOWN_CLASS);
    }

    #[test]
    fn ids_are_unique() {
        let cs = parse_roster("学习部 - 张三 (高二1班)\n学习部 - 张三 (高二1班)");
        assert_eq!(cs.len(), 2);
        assert_ne!(cs[0].id, cs[1].id);
    }
}
