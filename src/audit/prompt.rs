//! Prompt templates for the audit, style-analysis and image-generation calls.
//!
//! The audit prompt is the only contract the model sees for the report
//! schema. Field names and section titles here must stay in lockstep with
//! [`super::types`] and the validation in [`super::extract`].

use super::types::AuditCategory;
use std::fmt::Write as _;
use strum::IntoEnumIterator;

/// Per-section guidance embedded in the JSON skeleton.
struct SectionGuide {
    explanation_example: &'static str,
    score_hint: &'static str,
    positive_hint: &'static str,
    improvement_hint: &'static str,
    visualizable_example: bool,
}

fn section_guide(category: AuditCategory) -> SectionGuide {
    const SCORE: &str = "An integer score from 0 to 10 for this section";
    const POSITIVE: &str = "A specific, actionable positive point";
    const IMPROVEMENT: &str = "A specific, actionable area for improvement";

    match category {
        AuditCategory::Usability => SectionGuide {
            explanation_example: "This looks at core design principles to ensure your site is easy and frustration-free for visitors to use.",
            score_hint: SCORE,
            positive_hint: POSITIVE,
            improvement_hint: IMPROVEMENT,
            visualizable_example: true,
        },
        AuditCategory::VisualDesign => SectionGuide {
            explanation_example: "This section judges how visually appealing and professional your site looks, which builds trust and engages users.",
            score_hint: SCORE,
            positive_hint: POSITIVE,
            improvement_hint: IMPROVEMENT,
            visualizable_example: true,
        },
        AuditCategory::Accessibility => SectionGuide {
            explanation_example: "Here, we check if your site is usable by people with disabilities, which is crucial for inclusion and legal compliance.",
            score_hint: SCORE,
            positive_hint: POSITIVE,
            improvement_hint: IMPROVEMENT,
            visualizable_example: true,
        },
        AuditCategory::ContentClarity => SectionGuide {
            explanation_example: "This reviews how well your content is written and organized, making sure users can find what they need quickly.",
            score_hint: SCORE,
            positive_hint: POSITIVE,
            improvement_hint: IMPROVEMENT,
            visualizable_example: false,
        },
        AuditCategory::Performance => SectionGuide {
            explanation_example: "We analyze how fast your page loads, because a slow site can frustrate users and hurt your search ranking.",
            score_hint: "An integer score from 0 to 10 for this section, based on search findings for Core Web Vitals",
            positive_hint: "Positive performance aspect, e.g., 'Good First Contentful Paint'",
            improvement_hint: "Improvement point based on metrics, e.g., 'Reduce Largest Contentful Paint time'",
            visualizable_example: false,
        },
    }
}

fn schema_skeleton() -> String {
    let sections = AuditCategory::iter()
        .map(|category| {
            let guide = section_guide(category);
            format!(
                r#"    {{
      "title": "{title}",
      "explanation": "<A concise, conversational explanation. e.g., '{explanation}'>",
      "score": <{score}>,
      "positivePoints": ["<{positive}>"],
      "areasForImprovement": [{{"point": "<{improvement}>", "isVisualizable": {visualizable}}}]
    }}"#,
                title = category.title(),
                explanation = guide.explanation_example,
                score = guide.score_hint,
                positive = guide.positive_hint,
                improvement = guide.improvement_hint,
                visualizable = guide.visualizable_example,
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let mut skeleton = String::from("{\n");
    skeleton.push_str(
        "  \"overallScore\": <An integer score from 0 to 100 representing the combined UX/UI and performance quality>,\n",
    );
    skeleton.push_str(
        "  \"summary\": \"<A concise, one-paragraph summary of the key findings, including a note on performance.>\",\n",
    );
    skeleton.push_str("  \"sections\": [\n");
    skeleton.push_str(&sections);
    skeleton.push_str("\n  ]\n}");
    skeleton
}

/// Full audit prompt for `url`, including the JSON contract.
pub fn audit_prompt(url: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "Analyze the website at the URL: {url}");
    prompt.push('\n');
    prompt.push_str(
        "Act as a world-class senior UX/UI designer and performance analyst. \
         Perform a thorough UX/UI and performance audit of the website.\n",
    );
    prompt.push_str(
        "Your primary tool for performance analysis should be Google Search, looking for public data \
         related to its Core Web Vitals (LCP, INP, CLS) and general page speed.\n\n",
    );
    prompt.push_str(
        "Your response MUST be a single, valid JSON object. Do not include any text, pleasantries, \
         or markdown formatting before or after the JSON object.\n\n",
    );
    prompt.push_str(
        "For each section, provide a concise, one-sentence conversational \"explanation\" of what \
         the section covers and why it's important.\n\n",
    );
    prompt.push_str(
        "For each \"areasForImprovement\" item, you MUST provide an object with two keys:\n\
         1. \"point\": A string describing the specific, actionable area for improvement.\n\
         2. \"isVisualizable\": A boolean. Set this to true ONLY for points where a visual example \
         of a UI layout/design change would be highly effective. For points about performance \
         metrics, abstract concepts, or text-only changes, set it to false.\n\n",
    );
    let _ = writeln!(
        prompt,
        "The \"sections\" array MUST contain exactly these {} sections, in this order: {}.",
        AuditCategory::iter().count(),
        AuditCategory::iter()
            .map(|c| format!("\"{}\"", c.title()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    prompt.push('\n');
    prompt.push_str("The JSON object must conform to the following structure:\n");
    prompt.push_str(&schema_skeleton());
    prompt.push('\n');
    prompt
}

/// Stage A of the visualization workflow: describe the site's visual style.
pub fn style_description_prompt(url: &str) -> String {
    format!(
        "Analyze the visual styling and structure of the website at {url}.\n\
         Focus on the key design elements:\n\
         - Color Palette: Primary, secondary, accent, and background colors.\n\
         - Typography: Font families, weights, and sizes for headings and body text.\n\
         - Component Style: Describe the look of buttons, inputs, and cards (e.g., border-radius, shadows, fill).\n\
         - Layout: General page structure, use of grids, columns, and spacing.\n\
         - Overall Vibe: Is it minimalist, corporate, playful, dark-mode, etc.?\n\
         \n\
         Provide a concise, one-paragraph description of this visual style and structure. \
         This description will be used to guide an image generation model for structural context ONLY."
    )
}

/// Stage B of the visualization workflow: a monochrome wireframe of the fix.
pub fn visual_example_prompt(improvement: &str, style_description: &str) -> String {
    format!(
        "You are a UI/UX design visualizer. Your task is to create a single, clear image \
         demonstrating an ideal design solution. This is for quick and educational learning.\n\
         \n\
         **The UI/UX improvement point to demonstrate a solution for:**\n\
         \"{improvement}\"\n\
         \n\
         **The original site's visual style description to reference for structure:**\n\
         \"{style}\"\n\
         \n\
         **Image Requirements:**\n\
         - Create a single image showing **ONLY the ideal, corrected design solution**.\n\
         - The image should be clearly titled 'Ideal Solution' or 'Suggested Improvement'.\n\
         - Create a medium-fidelity wireframe that shows the CORRECTED design, directly solving the issue described in the improvement point.\n\
         - For example, if the problem is 'weak visual hierarchy', the wireframe should show clear headings, proper spacing, and distinct button styles to guide the user's eye.\n\
         - Base the general structure on the provided style description, but prioritize demonstrating the design solution.\n\
         \n\
         **Style Rules:**\n\
         - **Clarity is paramount.** The visual solution should be obvious.\n\
         - Use a clean, modern wireframe style.\n\
         - The design must be **monochromatic** (only shades of gray, black, and white).\n\
         - Use simple placeholder shapes for images (e.g., a rectangle with a cross) and \"lorem ipsum\" for text.\n\
         - **Do not use any real branding, logos, or colors from any website.** Keep it generic and conceptual.",
        improvement = improvement.trim(),
        style = style_description.trim(),
    )
}
