use crate::utils::log::t;

pub const TITLE: &str = "COT POSITIONING DASHBOARD";
const RULE_WIDTH: usize = 64;

fn rule() -> String {
  t::dim("=".repeat(RULE_WIDTH))
}

/// Lines printed before the dashboard starts.
pub fn banner_lines(repo_root: &str) -> Vec<String> {
  vec![
    rule(),
    format!("  {}", t::title(TITLE)),
    rule(),
    String::new(),
    format!("Repository: {}", t::path(repo_root)),
    "The dashboard opens in your browser once the server is ready".to_string(),
    format!("(usually {}).", t::path("http://localhost:8501")),
    format!("Press {} to stop the server.", t::title("Ctrl+C")),
    String::new(),
  ]
}
