use colored::Colorize;
use miette::Result;

/// Terminal reporter with colored output
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            println!("{}", "No unused dependencies found!".green().bold());
            return Ok(());
        }

        println!();
        println!(
            "{}",
            format!("Found {} unused dependencies:", names.len())
                .yellow()
                .bold()
        );
        println!();

        for name in names {
            self.print_name(name);
        }

        println!();
        println!("{}", "─".repeat(60).dimmed());
        println!(
            "{}",
            "Names were not found in any scanned file. Check dynamic requires before removing."
                .dimmed()
        );

        Ok(())
    }

    fn print_name(&self, name: &str) {
        // Dim the scope of scoped packages so the package name stands out
        match name.split_once('/') {
            Some((scope, package)) if scope.starts_with('@') => {
                println!("  {} {}{}", "•".yellow(), format!("{}/", scope).dimmed(), package.white().bold());
            }
            _ => println!("  {} {}", "•".yellow(), name.white().bold()),
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
