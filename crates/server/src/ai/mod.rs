//! OpenRouter generation client.
//!
//! One chat-completions call per operation: the prompt carries a JSON
//! schema hint, the reply text is parsed as JSON with optional-field
//! defaulting. A non-2xx reply or unparsable JSON is terminal for the
//! request: there is no retry and the caller falls back to its pre-call
//! state.

use serde_json::{json, Value};

use shared::patch::{GeneratedObject, GeneratedRoom, GenerationRequest, GenerationResponse, RoomPatch};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const MODEL: &str = "google/gemini-3-flash-preview";

const BASE_RULES: &str = r#"
The style must strictly match "Classic Detailed Voxel Art".
Sub-parts MUST touch or overlap (structural integrity).
Use vibrant, clean colors that represent the real object's materials.
"#;

fn room_prompt(size_feet: f64) -> String {
    format!(
        r#"Analyze this room photo and reconstruct it as a 3D modular isometric voxel environment.
The room is approximately {size}x{size} feet.
{rules}
Assign objects positions on a grid where 1 unit = 1 foot.
Ensure major furniture pieces are correctly scaled relative to each other and the {size}ft room size.
Return JSON with wallColor, floorColor, and objects array."#,
        size = size_feet,
        rules = BASE_RULES,
    )
}

const OBJECT_PROMPT: &str = r#"
Analyze the MAIN SINGLE OBJECT in this photo. Reconstruct it as a high-fidelity 3D voxel module with a "Voxel Toy" aesthetic.
Scaling: Assume the object is a standard size for its type (e.g., a chair is ~1.5x1.5x3 units, a desk is ~4x2x2.5 units). 1 unit = 1 foot.
Focus on EXAGGERATING and EMPHASIZING the object's unique silhouettes and most recognizable features.
Instead of raw complexity, use 20-40 well-placed blocks to create a stylized, cartoonish version.
Ignore the background environment completely.
Return JSON with a single object definition (name, type, parts, color, description).
"#;

fn decorate_prompt(room_json: &str, instruction: &str) -> String {
    format!(
        r#"You are an expert interior designer and 3D voxel artist.
Current Room Data: {room_json}
User Request: {instruction}

Your task is to analyze the room and the user's request, then suggest modifications.
You can ADD, REMOVE, or MODIFY objects.
For NEW objects, provide full voxel object definitions.
For REMOVALS, specify the IDs.
For MODIFICATIONS, provide the updated object.

Always maintain the 1 unit = 1 foot scale and ensure objects are placed realistically.
Return JSON with three optional arrays: 'add', 'remove' (IDs), 'update', and an 'assistantMessage' string."#
    )
}

fn refine_prompt(object_json: &str) -> String {
    format!(
        r#"You are a Quality Control Agent for 3D Voxel Assets.
Current Object Data: {object_json}

Evaluate this object's geometry and color:
1. Are structural parts (legs, arms, supports) connected to the main body?
2. Is the vertical stacking logical (e.g., table tops shouldn't float)?
3. Are the proportions realistic (e.g., a chair back shouldn't be 10ft tall)?
4. Is the color palette cohesive?

If there are issues, fix the 'parts' array. Move, resize, or add parts to ensure a high-quality, professional voxel look.
Ensure the object is centered at [0, 0, 0] offset-wise (relative to its position).
Return the corrected JSON."#
    )
}

fn part_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "offset": { "type": "array", "items": { "type": "number" } },
            "dimensions": { "type": "array", "items": { "type": "number" } },
            "color": { "type": "string" }
        },
        "required": ["offset", "dimensions", "color"]
    })
}

fn object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "type": { "type": "string" },
            "color": { "type": "string" },
            "description": { "type": "string" },
            "parts": { "type": "array", "items": part_schema() }
        },
        "required": ["name", "type", "parts"]
    })
}

fn room_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "wallColor": { "type": "string" },
            "floorColor": { "type": "string" },
            "objects": { "type": "array", "items": object_schema() }
        },
        "required": ["wallColor", "floorColor", "objects"]
    })
}

fn decorate_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "add": { "type": "array", "items": object_schema() },
            "remove": { "type": "array", "items": { "type": "string" } },
            "update": { "type": "array", "items": object_schema() },
            "assistantMessage": { "type": "string" }
        }
    })
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("OPENROUTER_API_KEY not set")]
    NoApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("OpenRouter API error: {status} - {body}")]
    Upstream { status: u16, body: String },
    #[error("no content in response")]
    EmptyReply,
    #[error("reply is not valid JSON: {0}")]
    BadJson(#[from] serde_json::Error),
}

/// Run one generation operation against OpenRouter.
pub async fn generate(
    client: &reqwest::Client,
    api_key: Option<&str>,
    request: GenerationRequest,
) -> Result<GenerationResponse, AiError> {
    let api_key = api_key.ok_or(AiError::NoApiKey)?;

    match request {
        GenerationRequest::Room { image, size_feet } => {
            let reply = call_openrouter(
                client,
                api_key,
                Some(&image),
                room_prompt(size_feet),
                &room_schema(),
            )
            .await?;
            Ok(GenerationResponse::Room {
                room: parse_room(reply),
            })
        }
        GenerationRequest::Object { image } => {
            let reply = call_openrouter(
                client,
                api_key,
                Some(&image),
                format!("{OBJECT_PROMPT}\n{BASE_RULES}"),
                &object_schema(),
            )
            .await?;
            Ok(GenerationResponse::Object {
                object: parse_object(reply)?,
            })
        }
        GenerationRequest::Decorate { room, instruction } => {
            let room_json = serde_json::to_string(&room)?;
            let reply = call_openrouter(
                client,
                api_key,
                None,
                decorate_prompt(&room_json, &instruction),
                &decorate_schema(),
            )
            .await?;
            Ok(GenerationResponse::Decorate {
                patch: parse_patch(reply)?,
            })
        }
        GenerationRequest::Refine { image, object } => {
            let object_json = serde_json::to_string(&object)?;
            let reply = call_openrouter(
                client,
                api_key,
                Some(&image),
                refine_prompt(&object_json),
                &object_schema(),
            )
            .await?;
            Ok(GenerationResponse::Refine {
                object: parse_object(reply)?,
            })
        }
    }
}

/// One chat-completions call: prompt + schema hint (+ optional image),
/// reply content parsed as a JSON value.
async fn call_openrouter(
    client: &reqwest::Client,
    api_key: &str,
    image: Option<&str>,
    prompt: String,
    schema: &Value,
) -> Result<Value, AiError> {
    let mut content = vec![json!({
        "type": "text",
        "text": format!(
            "{}\n\nYou MUST respond with valid JSON matching this schema:\n{}",
            prompt,
            serde_json::to_string_pretty(schema).unwrap_or_default()
        )
    })];
    if let Some(image) = image {
        content.push(json!({
            "type": "image_url",
            "image_url": { "url": image }
        }));
    }

    let response = client
        .post(OPENROUTER_URL)
        .bearer_auth(api_key)
        .header("X-Title", "VoxelRoom")
        .json(&json!({
            "model": MODEL,
            "messages": [{ "role": "user", "content": content }],
            "response_format": { "type": "json_object" },
            "temperature": 0.7
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let body: Value = response.json().await?;
    let content = body["choices"]
        .as_array()
        .and_then(|c| c.first())
        .and_then(|c| c["message"]["content"].as_str())
        .ok_or(AiError::EmptyReply)?;

    Ok(serde_json::from_str(content)?)
}

// ── Reply parsing (optional-field defaulting only) ───────────

fn parse_room(reply: Value) -> GeneratedRoom {
    let mut room: GeneratedRoom = serde_json::from_value(reply).unwrap_or_default();
    if room.wall_color.is_empty() {
        room.wall_color = "#cbd5e1".to_string();
    }
    if room.floor_color.is_empty() {
        room.floor_color = "#94a3b8".to_string();
    }
    room
}

fn parse_object(reply: Value) -> Result<GeneratedObject, AiError> {
    Ok(serde_json::from_value(reply)?)
}

fn parse_patch(reply: Value) -> Result<RoomPatch, AiError> {
    Ok(serde_json::from_value(reply)?)
}
