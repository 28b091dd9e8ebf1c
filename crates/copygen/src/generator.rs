//! Ad-copy generator.
//!
//! A pure template system: the prompt is mined for product / audience /
//! selling-point facets and variations are rendered from fixed headline and
//! body pools. No model calls, no I/O.

use adbridge_core::{BridgeError, BridgeResult};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

/// Maximum variations a single call may request.
pub const MAX_VARIATIONS: usize = 10;

/// Facets parsed out of a freeform ad prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFacets {
    pub product: String,
    pub audience: String,
    pub benefits: Vec<String>,
}

impl PromptFacets {
    /// Extract facets from a prompt of the form
    /// `Product: X. Target Audience: Y. Key Selling Points: a, b, c.`
    /// Missing facets fall back to generic copy.
    pub fn parse(prompt: &str) -> Self {
        let product = facet(prompt, "Product:").unwrap_or_else(|| "your product".to_string());
        let audience =
            facet(prompt, "Target Audience:").unwrap_or_else(|| "customers".to_string());
        let benefits: Vec<String> = facet(prompt, "Key Selling Points:")
            .or_else(|| facet(prompt, "Benefits:"))
            .map(|raw| {
                raw.split(',')
                    .map(|benefit| benefit.trim().to_string())
                    .filter(|benefit| !benefit.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let benefits = if benefits.is_empty() {
            vec!["quality".to_string()]
        } else {
            benefits
        };

        Self {
            product,
            audience,
            benefits,
        }
    }
}

/// Pull the text between `label` and the next `.` (or end of prompt).
fn facet(prompt: &str, label: &str) -> Option<String> {
    let rest = prompt.split(label).nth(1)?;
    let value = rest.split('.').next().unwrap_or(rest).trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Template-based ad-copy generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyGenerator;

impl CopyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` ad-copy variations for `prompt`.
    ///
    /// Each variation is a `Headline: ...` / `Body: ...` pair rendered from
    /// the parsed prompt facets. Every headline template embeds the product
    /// name, so every variation mentions what is being advertised.
    pub fn generate(&self, prompt: &str, count: usize) -> BridgeResult<Vec<String>> {
        if prompt.trim().is_empty() {
            return Err(BridgeError::ContentGeneration(
                "prompt must not be empty".to_string(),
            ));
        }
        if count == 0 || count > MAX_VARIATIONS {
            return Err(BridgeError::Validation(format!(
                "num_variations must be between 1 and {MAX_VARIATIONS}"
            )));
        }

        let facets = PromptFacets::parse(prompt);
        let mut rng = rand::thread_rng();
        let headlines = headline_pool(&facets);
        let bodies = body_pool(&facets, &mut rng);

        let variations = (0..count)
            .map(|_| {
                let headline = &headlines[rng.gen_range(0..headlines.len())];
                let body = &bodies[rng.gen_range(0..bodies.len())];
                format!("Headline: {headline}\n\nBody: {body}")
            })
            .collect();

        debug!(count, product = %facets.product, "Generated ad copy variations");
        Ok(variations)
    }
}

/// Headline templates. Every template embeds the product name.
fn headline_pool(facets: &PromptFacets) -> Vec<String> {
    let product = &facets.product;
    let audience = &facets.audience;
    vec![
        format!("Discover the Perfect {product}"),
        format!("{product} - Made for {audience}"),
        format!("Elevate Your Experience with {product}"),
        format!("The {product} You've Been Waiting For"),
        format!("Why {audience} Choose Our {product}"),
        format!("Introducing: The Ultimate {product}"),
        format!("Transform Your Life with {product}"),
        format!("The Smart Choice: {product}"),
        format!("{product} - Quality You Can Trust"),
        format!("Experience the {product} Difference"),
    ]
}

fn body_pool(facets: &PromptFacets, rng: &mut ThreadRng) -> Vec<String> {
    let product = &facets.product;
    let audience = &facets.audience;
    let benefit = {
        let benefits = &facets.benefits;
        move |rng: &mut ThreadRng| benefits[rng.gen_range(0..benefits.len())].clone()
    };

    vec![
        format!(
            "Designed specifically for {audience}. {} and more. Try it today!",
            capitalize(&benefit(rng))
        ),
        format!(
            "Join thousands of satisfied {audience} who love our {product}. {}!",
            capitalize(&benefit(rng))
        ),
        format!(
            "Our {product} offers {} like never before. Perfect for {audience}.",
            benefit(rng)
        ),
        format!(
            "Why settle for less? Our {product} provides {} and {}.",
            benefit(rng),
            benefit(rng)
        ),
        format!(
            "Specially crafted for {audience}. Experience {} today!",
            benefit(rng)
        ),
        format!(
            "The {product} that delivers. {} and {}.",
            capitalize(&benefit(rng)),
            benefit(rng)
        ),
        format!(
            "Stand out with our premium {product}. {} guaranteed.",
            capitalize(&benefit(rng))
        ),
        format!(
            "Trusted by {audience} everywhere. {} and more!",
            capitalize(&benefit(rng))
        ),
        format!(
            "Elevate your experience with our {product}. {}!",
            capitalize(&benefit(rng))
        ),
        format!(
            "The smarter choice for {audience}. {} like never before.",
            benefit(rng)
        ),
    ]
}
