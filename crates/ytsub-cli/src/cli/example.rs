//! `--create` – write an example subscriptions.txt to the current directory.

use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE: &str = r#"# ytsub subscriptions
# Lines before the first [section] apply to every subscription.
# Full-line comments start with '#', '//', or ';'.

-f "bestvideo[height<=1080]+bestaudio/best"
-organize clips: /clip/i ; files with "clip" in the name go to clips/

# Each [section] is one subscription. Settings above the ---- separator,
# source URLs below it.
[music]
--playlist-end 10
-organize live: /live|concert/i
--------
https://www.youtube.com/@example/videos
https://www.youtube.com/playlist?list=PLxxxxxxxxxxxxxxxx
"#;

/// Writes the example document into the current directory, refusing to
/// overwrite an existing one.
pub fn create_example() -> Result<()> {
    let dest = Path::new("subscriptions.txt");
    if dest.exists() {
        println!("subscriptions.txt already exists, not overwriting.");
        return Ok(());
    }
    std::fs::write(dest, EXAMPLE).context("writing subscriptions.txt")?;
    println!("Created example subscriptions.txt in the current directory.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::EXAMPLE;
    use ytsub_core::document::Document;
    use ytsub_core::subscription::SubscriptionSet;

    #[test]
    fn example_document_parses_cleanly() {
        let set = SubscriptionSet::from_document(&Document::parse(EXAMPLE));
        assert_eq!(set.global.organize.len(), 1);
        assert!(set.global.organize.get("clips").is_some());
        assert_eq!(
            set.global.arguments,
            vec!["-f", "bestvideo[height<=1080]+bestaudio/best"]
        );

        assert_eq!(set.subscriptions.len(), 1);
        let sub = &set.subscriptions[0];
        assert_eq!(sub.name, "music");
        assert_eq!(sub.urls.len(), 2);
        assert_eq!(sub.organize.len(), 2);
        assert!(sub.organize.get("live").unwrap().is_match("Concert 2024.mkv"));
    }
}
