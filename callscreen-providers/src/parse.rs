use anyhow::{Context, anyhow};
use serde::Deserialize;

// Shape of the Responses API body we care about: output items carrying
// `output_text` content parts. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Concatenates all `output_text` parts of a Responses API body.
pub fn parse_responses_output(body: &[u8]) -> anyhow::Result<String> {
    let resp: ResponsesBody = serde_json::from_slice(body).context("decode responses JSON")?;

    let mut pieces: Vec<String> = vec![];
    for item in resp.output {
        for part in item.content {
            if part.kind == "output_text" {
                if let Some(text) = part.text {
                    pieces.push(text);
                }
            }
        }
    }

    if pieces.is_empty() {
        return Err(anyhow!("no output text in response"));
    }
    Ok(pieces.concat())
}
