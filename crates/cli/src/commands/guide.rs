//! `lappybot faq` and `lappybot troubleshoot`: the static guide answers.

use lappybot_catalog::GuideBook;

pub fn faq(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let guide = GuideBook::builtin()?;
    println!("{}", guide.faq(question));
    Ok(())
}

pub fn troubleshoot(issue: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let guide = GuideBook::builtin()?;
    match issue {
        Some(issue) => println!("{}", guide.troubleshoot(issue)),
        None => {
            println!("Known issues:");
            for issue in guide.issues() {
                println!("  - {issue}");
            }
        }
    }
    Ok(())
}
