extern crate synced_lyrics;

use synced_lyrics::{Client, SpDcCookie, SyncedLyrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = std::env::args().collect::<Vec<_>>();

    if args.len() < 2 {
        println!("Please specify the first argument to be the track id");
        std::process::exit(1);
    }

    let cookie = SpDcCookie::new(std::env::var(SpDcCookie::ENV_VAR)?)?;
    let client = Client::new(cookie).await?;
    let lyrics = SyncedLyrics::from_value(&client.get_lyrics(&args[1]).await?)?;

    for line in lyrics.lines {
        let secs = line.start_time_ms / 1000;
        println!("[{}:{:02}] {}", secs / 60, secs % 60, line.words);
    }

    Ok(())
}
