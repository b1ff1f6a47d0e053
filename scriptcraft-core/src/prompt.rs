use crate::error::RequestError;
use crate::request::ScriptRequest;
use crate::types::ContentKind;

/// Number of question slots laid out in the podcast template; the first
/// `PODCAST_MIN_QUESTIONS` are mandatory.
pub const PODCAST_MAX_QUESTIONS: usize = 8;
pub const PODCAST_MIN_QUESTIONS: usize = 5;

/// Builds the instruction string for a script request given as loose strings.
///
/// Unknown kinds or tones and a blank topic are rejected before anything else
/// happens, so no generation call is ever made for them.
pub fn build_prompt(
    content_kind: &str,
    topic: &str,
    tone: &str,
    duration_hint: &str,
    audience: &str,
) -> Result<String, RequestError> {
    let req = ScriptRequest::parse(content_kind, topic, tone, duration_hint, audience)?;
    render_prompt(&req)
}

/// Builds the instruction string for an already typed request.
pub fn render_prompt(req: &ScriptRequest) -> Result<String, RequestError> {
    req.validate()?;

    let prompt = match req.content_kind {
        ContentKind::SocialShort => social_short_prompt(req),
        ContentKind::LongFormVideo => long_form_video_prompt(req),
        ContentKind::PodcastQa => podcast_qa_prompt(req),
    };
    Ok(prompt)
}

fn social_short_prompt(req: &ScriptRequest) -> String {
    format!(
        "Generate an engaging Instagram reel/story script about: \"{topic}\"\n\
Tone: {tone}\n\
Duration: {duration} (keep it under 60 seconds of speaking time)\n\
Target Audience: {audience}\n\n\
Format the script with clear sections for:\n\
- Hook (attention-grabbing opening)\n\
- Main content (2-3 key points)\n\
- Call to action\n\n\
Include suggestions for visual elements/transitions in [brackets].",
        topic = req.topic,
        tone = req.tone,
        duration = req.duration_hint,
        audience = req.audience,
    )
}

fn long_form_video_prompt(req: &ScriptRequest) -> String {
    format!(
        "Generate a structured YouTube video script for: \"{topic}\"\n\
Tone: {tone}\n\
Duration: {duration}\n\
Target Audience: {audience}\n\n\
Format with:\n\
- Intro (30 seconds): attention-grabbing opening\n\
- Main content with clear sections, each starting with a timestamp cue like [00:30]\n\
- Conclusion and call to action\n\n\
Include B-roll suggestions, talking points, and transitions in [brackets].",
        topic = req.topic,
        tone = req.tone,
        duration = req.duration_hint,
        audience = req.audience,
    )
}

fn podcast_qa_prompt(req: &ScriptRequest) -> String {
    let mut slots = String::new();
    for n in 1..=PODCAST_MAX_QUESTIONS {
        let note = if n <= PODCAST_MIN_QUESTIONS {
            ""
        } else {
            " (optional)"
        };
        slots.push_str(&format!(
            "Question {n}{note}: <main question>\n  Follow-ups: <2-3 follow-up questions>\n"
        ));
    }

    format!(
        "Generate a set of insightful Q&A prompts for a podcast titled: \"{topic}\"\n\
Tone: {tone}\n\
Episode length: {duration}\n\
Target Audience: {audience}\n\n\
Include:\n\
- Opening segment: how the host welcomes listeners and introduces the topic\n\
- {min}-{max} thought-provoking questions\n\
- 2-3 follow-up questions for each main question\n\
- Talking points for the host\n\
- Closing segment: wrap-up and sign-off\n\n\
Lay the questions out like this:\n\
{slots}\n\
Questions should encourage in-depth, interesting responses.",
        topic = req.topic,
        tone = req.tone,
        duration = req.duration_hint,
        audience = req.audience,
        min = PODCAST_MIN_QUESTIONS,
        max = PODCAST_MAX_QUESTIONS,
    )
}
