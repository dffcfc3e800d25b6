//! Prompt templates for every endpoint. Pure string building; adherence of
//! the model to a template is only enforced by downstream parsing.

use rand::seq::SliceRandom;

/// Thematic angles used to diversify practice questions. One is picked
/// uniformly at random per request.
pub const ASPECTS: [&str; 5] = [
    "core_concepts",
    "applications",
    "problem_solving",
    "analysis",
    "current_trends",
];

pub fn playground_question(topic: &str, level: u8, age: u32) -> (String, String) {
    let aspect = *ASPECTS
        .choose(&mut rand::thread_rng())
        .unwrap_or(&ASPECTS[0]);
    let focus = aspect.replace('_', " ");

    let system_prompt = format!(
        r#"Generate a UNIQUE multiple-choice question about {topic}.
Focus on: {focus}

Return in this JSON format:
{{
  "text": "question text here",
  "options": ["option A", "option B", "option C", "option D"],
  "correctAnswer": RANDOMLY_PICKED_NUMBER_0_TO_3,
  "explanation": {{
    "correct": "Brief explanation of why the correct answer is right (max 15 words)",
    "key_point": "One key concept to remember (max 10 words)"
  }},
  "difficulty": {level},
  "topic": "{topic}",
  "subtopic": "specific subtopic",
  "questionType": "conceptual",
  "ageGroup": "{age}"
}}

IMPORTANT RULES FOR UNIQUENESS:
1. For {topic}, based on the selected aspect:
   - core_concepts: Focus on fundamental principles and theories
   - applications: Focus on real-world use cases and implementations
   - problem_solving: Present a scenario that needs solution
   - analysis: Compare different approaches or technologies
   - current_trends: Focus on recent developments and future directions

2. Question Variety:
   - NEVER use the same question pattern twice
   - Mix theoretical and practical aspects
   - Include industry-specific examples
   - Use different question formats (what/why/how/compare)
   - Incorporate current developments in {topic}

3. Answer Choices:
   - Make ALL options equally plausible
   - Randomly assign the correct answer (0-3)
   - Ensure options are distinct but related
   - Include common misconceptions
   - Make wrong options educational

4. Format Requirements:
   - Question must be detailed and specific
   - Each option must be substantive
   - Explanation must cover why the correct answer is right AND why others are wrong
   - Include real-world context where possible
   - Use age-appropriate language

EXPLANATION GUIDELINES:
- Keep explanations extremely concise and clear
- Focus on the most important point only
- Use simple language
- Highlight the key concept
- No redundant information
- Maximum 25 words total"#
    );

    let user_prompt = format!(
        r#"Create a completely unique {level}/10 difficulty question about {topic}.
Focus on {focus}.
Ensure the correct answer is randomly placed.
Make it engaging for a {age} year old student.
Use current examples and trends."#
    );

    (system_prompt, user_prompt)
}

pub fn test_set(topic: &str, exam_type: &str) -> (String, String) {
    let system_prompt = format!(
        r#"Create a {exam_type} exam test set about {topic}.
Generate exactly 15 questions following this structure:
{{
  "questions": [
    {{
      "text": "Clear question text",
      "options": ["A", "B", "C", "D"],
      "correctAnswer": 0,
      "explanation": "Step-by-step solution",
      "difficulty": 1,
      "topic": "{topic}",
      "subtopic": "specific concept",
      "examType": "{exam_type}",
      "questionType": "conceptual"
    }}
  ]
}}"#
    );

    let user_prompt =
        format!("Create 15 {exam_type} questions about {topic} (5 easy, 5 medium, 5 hard)");

    (system_prompt, user_prompt)
}

pub fn explore(query: &str) -> (String, String) {
    let system_prompt = "You are a social media trend expert who explains topics by connecting \
                         them to current viral trends, memes, and pop culture moments."
        .to_string();

    let user_prompt = format!(
        r#"Explain "{query}" using current social media trends, memes, and pop culture references.

Content Style Guide:
1. Social Media Format Mix:
   - Start with a TikTok-style hook ("POV: you're learning {query}")
   - Add Instagram carousel-style bullet points
   - Use Twitter/X thread style for facts
   - Include YouTube shorts-style quick explanations
   - End with a viral trend reference

2. Current Trends to Use:
   - Reference viral TikTok sounds/trends
   - Use current meme formats
   - Mention trending shows/movies
   - Reference popular games
   - Include viral challenges
   - Use trending audio references

3. Make it Relatable With:
   - Instagram vs Reality comparisons
   - "That one friend who..." examples
   - "Nobody: / Me:" format
   - "Real ones know..." references
   - "Living rent free in my head" examples
   - "Core memory" references

4. Structure it Like:
   - The Hook (TikTok style intro)
   - The Breakdown (Instagram carousel style)
   - The Tea (Twitter thread style facts)
   - Quick Takes (YouTube shorts style)
   - The Trend Connection (viral reference)

5. Related Content Style:
   - "Trending topics to explore..."
   - "This gives... vibes"
   - "Main character moments in..."
   - "POV: when you learn about..."

Important:
- Use CURRENT trends
- Reference viral moments
- Make pop culture connections
- Use platform-specific formats
- Keep updating references"#
    );

    (system_prompt, user_prompt)
}

pub fn stream_explore(query: &str, age: u32) -> (String, String) {
    let system_prompt = format!(
        r#"You are a Gen-Z tutor who explains complex topics concisely for a {age} year old.
First provide the explanation in plain text, then provide related content in a STRICT single-line JSON format.

Structure your response exactly like this:

<paragraph 1>

<paragraph 2>

<paragraph 3>

---
{{"topics":[{{"name":"Topic","type":"prerequisite","detail":"Why"}}],"questions":[{{"text":"Q?","type":"curiosity","detail":"Context"}}]}}

RULES:
- ADAPT CONTENT FOR A {age} YEAR OLD
- STRICT LENGTH LIMITS (80 words max)
- MUST provide EXACTLY 5 related topics and 5 questions
- Keep paragraphs clear and simple
- JSON must be in a single line"#
    );

    let user_prompt = format!(
        r#"Explain "{query}" in three concise paragraphs for a {age} year old:
1. Basic definition (15-20 words)
2. Key details (15-20 words)
3. Direct applications and facts (15-20 words)

Then provide 5 related topics and 5 curiosity questions in JSON format after "---"."#
    );

    (system_prompt, user_prompt)
}
