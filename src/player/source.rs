use serde::Deserialize;
use tokio::process::Command;

use crate::Error;

pub struct MediaInfo {
    pub title: String,
    pub duration: Option<String>,
}

#[derive(Deserialize)]
struct YtDlpOutput {
    title: Option<String>,
    duration: Option<f64>,
}

/// Probes a URL locator with yt-dlp before it is accepted into the library,
/// so a typo'd link is caught at add time instead of at playback.
pub async fn probe_url(url: &str) -> Result<MediaInfo, Error> {
    let output = Command::new("yt-dlp")
        .args(["-j", "--no-playlist", "--no-warnings", url])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("yt-dlp error: {stderr}").into());
    }

    let info: YtDlpOutput = serde_json::from_slice(&output.stdout)?;

    let duration = info.duration.map(|d| {
        let secs = d as u64;
        format!("{}:{:02}", secs / 60, secs % 60)
    });

    Ok(MediaInfo {
        title: info.title.unwrap_or_else(|| url.to_string()),
        duration,
    })
}
