use colored::Colorize;

const LOGO: &str = r"
                            _           _
  _ __  _ __ ___  _ __   __| | ___  ___| | __
 | '_ \| '__/ _ \| '_ \ / _` |/ _ \/ __| |/ /
 | |_) | | | (_) | |_) | (_| |  __/ (__|   <
 | .__/|_|  \___/| .__/ \__,_|\___|\___|_|\_\
 |_|             |_|
";

pub fn print_banner_with_version() {
    println!("{}", LOGO.green());
    println!(
        "  {} {}",
        "propdeck".bold(),
        env!("CARGO_PKG_VERSION").bold()
    );
    println!("  {}", "Client proposals, presented.".dimmed());
    println!();
}
