//! Prompt construction for recommendation requests.

use super::types::LikedFilm;

/// Number of recommendations the model is asked for.
pub const RECOMMENDATION_COUNT: usize = 5;

/// Build the recommendation prompt.
///
/// The liked films are listed as `- Title (Year)` lines in input order.
/// The context line is included only when non-empty and the exclusion
/// block only when there is at least one excluded title.
pub fn build_prompt(films: &[LikedFilm], context: Option<&str>, exclude_films: &[String]) -> String {
    let film_list = films
        .iter()
        .map(|f| format!("- {} ({})", f.title, f.year))
        .collect::<Vec<_>>()
        .join("\n");

    let context_line = match context {
        Some(context) if !context.is_empty() => format!("\nWhat I liked: {}", context),
        _ => String::new(),
    };

    let exclude_block = if exclude_films.is_empty() {
        String::new()
    } else {
        let titles = exclude_films
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "\n\nDo not recommend these films (user has already seen them):\n{}",
            titles
        )
    };

    format!(
        r#"I enjoyed these films:
{film_list}
{context_line}{exclude_block}

Based on these films, recommend {RECOMMENDATION_COUNT} movies I would enjoy. For each recommendation, explain why it matches what I'm looking for.

Format your response as a JSON array with this structure:
[
  {{
    "title": "Film Title",
    "reason": "Brief explanation of why this matches (2-3 sentences)"
  }}
]

Only return the JSON array, no other text."#
    )
}
