use chrono::Local;
use serde::Serialize;

use vote_tally::{compute_winners, group_by_department, summarize, Candidate};

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ExportSummary {
    #[serde(rename = "totalVotes")]
    pub total_votes: u64,
    #[serde(rename = "totalDepartments")]
    pub total_departments: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ExportWinnerCandidate {
    pub name: String,
    #[serde(rename = "className")]
    pub class_name: String,
    pub votes: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ExportWinner {
    pub department: String,
    #[serde(rename = "maxVotes")]
    pub max_votes: u64,
    pub candidates: Vec<ExportWinnerCandidate>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ExportCandidate {
    pub id: String,
    pub department: String,
    pub name: String,
    #[serde(rename = "className")]
    pub class_name: String,
    pub votes: u64,
}

/// The JSON document written by `export`. Write-only: it is never read
/// back by this program.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ResultsExport {
    pub title: String,
    #[serde(rename = "exportDate")]
    pub export_date: String,
    pub summary: ExportSummary,
    pub winners: Vec<ExportWinner>,
    #[serde(rename = "allCandidates")]
    pub all_candidates: Vec<ExportCandidate>,
}

fn export_date() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn build_export(candidates: &[Candidate]) -> ResultsExport {
    let groups = group_by_department(candidates);
    let winners = compute_winners(&groups);
    let summary = summarize(candidates, &groups);
    ResultsExport {
        title: "Election Results".to_string(),
        export_date: export_date(),
        summary: ExportSummary {
            total_votes: summary.total_votes,
            total_departments: summary.total_departments,
        },
        winners: winners
            .iter()
            .map(|w| ExportWinner {
                department: w.department.clone(),
                max_votes: w.max_votes,
                candidates: w
                    .candidates
                    .iter()
                    .map(|c| ExportWinnerCandidate {
                        name: c.name.clone(),
                        class_name: c.class_name.clone(),
                        votes: c.votes,
                    })
                    .collect(),
            })
            .collect(),
        all_candidates: candidates
            .iter()
            .map(|c| ExportCandidate {
                id: c.id.clone(),
                department: c.department.clone(),
                name: c.name.clone(),
                class_name: c.class_name.clone(),
                votes: c.votes,
            })
            .collect(),
    }
}

pub fn json_report(candidates: &[Candidate]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_export(candidates))
}

/// The human-readable results report: one block per department with the
/// winners (or a placeholder when nobody has a vote yet), then totals.
pub fn text_report(candidates: &[Candidate]) -> String {
    let groups = group_by_department(candidates);
    let winners = compute_winners(&groups);
    let summary = summarize(candidates, &groups);

    let mut content = String::new();
    content.push_str("选举结果公示 (Election Results)\n");
    content.push_str(&format!("导出时间: {}\n", export_date()));
    content.push_str("========================================\n\n");

    for winner in winners.iter() {
        content.push_str(&format!("【{}】\n", winner.department));
        if winner.candidates.is_empty() {
            content.push_str("  (暂无胜出者)\n");
        } else {
            for c in winner.candidates.iter() {
                content.push_str(&format!(
                    "  ★ 胜出: {} ({}) - {}票\n",
                    c.name, c.class_name, c.votes
                ));
            }
        }
        content.push('\n');
    }

    content.push_str("========================================\n");
    content.push_str(&format!("总投票数: {}\n", summary.total_votes));
    content.push_str(&format!("统计部门: {}个\n", summary.total_departments));
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_tally::parse_roster;

    fn tallied_roster() -> Vec<Candidate> {
        let mut cs =
            parse_roster("学习部 - 张三 (高二1班)\n学习部 - 李四 (高二3班)\n文体部 - 王五 (高一2班)");
        cs[0].votes = 3;
        cs[1].votes = 1;
        cs
    }

    #[test]
    fn json_export_shape() {
        let cs = tallied_roster();
        let js: serde_json::Value = serde_json::from_str(&json_report(&cs).unwrap()).unwrap();
        assert_eq!(js["title"], "Election Results");
        assert_eq!(js["summary"]["totalVotes"], 4);
        assert_eq!(js["summary"]["totalDepartments"], 2);
        assert_eq!(js["winners"][0]["department"], "学习部");
        assert_eq!(js["winners"][0]["maxVotes"], 3);
        assert_eq!(js["winners"][0]["candidates"][0]["name"], "张三");
        assert_eq!(js["winners"][0]["candidates"][0]["className"], "高二1班");
        // The second department has no votes and therefore no winner.
        assert_eq!(js["winners"][1]["maxVotes"], 0);
        assert_eq!(js["winners"][1]["candidates"].as_array().unwrap().len(), 0);
        assert_eq!(js["allCandidates"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn text_export_blocks() {
        let report = text_report(&tallied_roster());
        assert!(report.contains("【学习部】"));
        assert!(report.contains("★ 胜出: 张三 (高二1班) - 3票"));
        assert!(report.contains("(暂无胜出者)"));
        assert!(report.contains("总投票数: 4"));
        assert!(report.contains("统计部门: 2个"));
    }
}
