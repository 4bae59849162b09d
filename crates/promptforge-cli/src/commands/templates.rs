use colored::Colorize;
use promptforge_core::template::PROMPT_TEMPLATES;

pub fn run() {
    for template in PROMPT_TEMPLATES {
        println!(
            "{}  {}",
            template.title.bright_cyan().bold(),
            format!("({})", template.prompt_type.as_str()).bright_black()
        );
        println!("  {}", template.idea);
    }
    println!();
    println!(
        "{}",
        "Use one with: promptforge generate --template \"<title>\"".bright_black()
    );
}
