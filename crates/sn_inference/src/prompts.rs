//! Instruction templates, one per [`Mode`].
//!
//! Templates are fixed text: the only variable parts are the article title
//! and content, which are embedded verbatim. Adding a mode means adding a new
//! template here, never editing the existing two.

use sn_core::{GenerationRequest, Mode};

/// Renders the prompt for `mode`. Pure and deterministic.
pub fn build_prompt(mode: Mode, title: &str, content: &str) -> String {
    match mode {
        Mode::Summary => summary_prompt(title, content),
        Mode::Notes => notes_prompt(title, content),
    }
}

pub fn render(request: &GenerationRequest) -> String {
    build_prompt(request.mode, &request.title, &request.content)
}

fn article_block(title: &str, content: &str) -> String {
    format!(
        "ARTICLE TITLE: \"{title}\"\n\nARTICLE CONTENT:\n\"\"\"\n{content}\n\"\"\"\n",
        title = title,
        content = content
    )
}

fn summary_prompt(title: &str, content: &str) -> String {
    format!(
        r#"You are a study assistant.

Create a CLEAN, WELL-STRUCTURED MARKDOWN summary.
Use simple language.
Do NOT add information that is not present in the article.

Formatting rules:
- Use Markdown headings (##)
- Use bullet points where appropriate
- Use **bold** only for important terms or concepts
- Keep it concise and readable

{article}
Write the summary in this exact structure:

## 📌 Overview
2–3 simple sentences explaining what this article is about.

## 🎯 Key Points
- Bullet points of the most important ideas
- Each point should be short and clear

## 💡 Main Takeaways
- What a learner should remember after reading this article
- Focus on understanding, not memorization

## 🧠 In Simple Words
Explain the topic in very easy language, as if teaching a beginner.
"#,
        article = article_block(title, content)
    )
}

fn notes_prompt(title: &str, content: &str) -> String {
    format!(
        r#"You are a teacher creating BEAUTIFUL, EASY-TO-READ MARKDOWN study notes.

Goals:
- Make notes beginner-friendly
- Explain concepts clearly
- Avoid unnecessary details
- Use proper Markdown formatting
- Do NOT invent information

Formatting rules:
- Use Markdown headings (#, ##, ###)
- Each concept must have a heading and explanation
- Use **bold** only for key terms
- Use bullet points only when helpful
- No large paragraphs

{article}
Create notes in the following format:

# 📘 {title}

## 🧠 Overview
Briefly explain what this topic is and why it is important.

## 📌 Key Concepts
For each major concept, use this format:

### 🔹 Concept Name
Explanation in simple language.
If needed, add 1–2 bullet points for clarity.

## 📝 Key Points
- Short bullet points of important ideas
- Easy to revise before exams or interviews

## 🔁 Quick Revision
- Very short bullets summarizing the whole topic
- Think "last-minute revision"

## ❓ Common Confusions
- Clarify things beginners often misunderstand (only if present in article)
"#,
        article = article_block(title, content),
        title = title
    )
}

/// Markdown heading lines of a rendered prompt that sit outside the quoted
/// article block.
pub fn schema_headings(prompt: &str) -> Vec<&str> {
    let mut in_article = false;
    prompt
        .lines()
        .filter(|line| {
            if *line == "\"\"\"" {
                in_article = !in_article;
                return false;
            }
            !in_article && line.starts_with('#')
        })
        .collect()
}
