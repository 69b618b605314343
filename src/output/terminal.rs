// Colored terminal output.
//
// This module handles all terminal-specific formatting so the command
// handlers in main.rs stay focused on wiring.

use colored::Colorize;

use crate::db::models::{Post, User};
use crate::predict::Prediction;
use crate::topics::TopicSummary;

/// Display the list of known users with their stored post counts.
pub fn display_users(users: &[(User, u32)]) {
    if users.is_empty() {
        println!("No users yet. Run `graphite add <username>` to ingest one.");
        return;
    }

    println!("\n{}", format!("=== Known users ({}) ===", users.len()).bold());
    println!();
    for (user, count) in users {
        println!(
            "  @{:<24} {:>5} posts  {}",
            user.username.bold(),
            count,
            format!("(id {})", user.id).dimmed()
        );
    }
    println!();
}

/// Display a user's stored posts, newest first.
pub fn display_posts(username: &str, posts: &[Post]) {
    println!(
        "\n{}",
        format!("=== @{username} — {} stored posts ===", posts.len()).bold()
    );
    println!();
    for post in posts {
        println!("  {}  {}", format!("[{}]", post.id).dimmed(), post.text);
    }
    println!();
}

/// Display a pairwise prediction result.
pub fn display_prediction(text: &str, prediction: &Prediction, other: &str) {
    println!();
    println!(
        "\"{}\" is more likely to be said by {} than {}.",
        text,
        format!("@{}", prediction.username).bold().bright_green(),
        format!("@{other}").bold()
    );
    println!(
        "  {}",
        format!("confidence: {:.1}%", prediction.confidence * 100.0).dimmed()
    );
}

/// Display a topic extraction result.
pub fn display_topics(username: &str, summary: &TopicSummary) {
    println!("\n{}", format!("=== Topics for @{username} ===").bold());
    println!();
    match summary {
        TopicSummary::NotEnoughData => {
            println!("  {}", "Not enough text to analyze.".yellow());
            println!("  Ingest more posts with `graphite add {username}` and try again.");
        }
        TopicSummary::Topics(joined) => {
            for (i, topic) in joined.split(" || ").enumerate() {
                println!("  {:>2}. {}", i + 1, topic);
            }
        }
    }
    println!();
}
