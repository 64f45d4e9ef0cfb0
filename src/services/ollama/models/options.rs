use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling and decoding parameters sent in the `options` field of a
/// `/api/generate` request.
///
/// Every field is optional; unset fields are left out of the request body and
/// the server falls back to its own defaults. Values are not range checked,
/// whatever is set here is forwarded to the server as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GenerationOptions {
    /// Sampling temperature (`0.0` = deterministic, higher = more random).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling probability threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top-K cutoff for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Strength of the repeat penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f64>,
    /// Context window size (in tokens).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
    /// RNG seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Stop sequences that end generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Any other option, forwarded verbatim. Keys should not repeat one of
    /// the named fields above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl GenerationOptions {
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn repeat_penalty(mut self, repeat_penalty: f64) -> Self {
        self.repeat_penalty = Some(repeat_penalty);
        self
    }

    pub fn num_ctx(mut self, num_ctx: u32) -> Self {
        self.num_ctx = Some(num_ctx);
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }

    pub fn extra<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds options from a loose JSON object. Known keys land in their
    /// named field, everything else in [`GenerationOptions::extra`].
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// A field set in `overrides` replaces the one in `self`; fields left
    /// unset in `overrides` keep their current value. `extra` entries are
    /// unioned, with the override winning on a key collision.
    pub fn merge(mut self, overrides: GenerationOptions) -> Self {
        let GenerationOptions {
            temperature,
            max_tokens,
            top_p,
            top_k,
            repeat_penalty,
            num_ctx,
            seed,
            stop,
            extra,
        } = overrides;

        self.temperature = temperature.or(self.temperature);
        self.max_tokens = max_tokens.or(self.max_tokens);
        self.top_p = top_p.or(self.top_p);
        self.top_k = top_k.or(self.top_k);
        self.repeat_penalty = repeat_penalty.or(self.repeat_penalty);
        self.num_ctx = num_ctx.or(self.num_ctx);
        self.seed = seed.or(self.seed);
        self.stop = stop.or(self.stop);
        self.extra.extend(extra);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn defaults() -> GenerationOptions {
        GenerationOptions::default()
            .temperature(0.1)
            .max_tokens(512)
            .top_p(0.9)
            .top_k(40)
            .repeat_penalty(1.1)
    }

    #[test]
    fn merge_with_empty_overrides_keeps_defaults() {
        let merged = defaults().merge(GenerationOptions::default());
        assert_eq!(merged, defaults());
    }

    #[test]
    fn merge_override_wins_and_untouched_defaults_survive() {
        let merged = defaults().merge(GenerationOptions::default().temperature(0.7).top_k(10));

        assert_eq!(merged.temperature, Some(0.7));
        assert_eq!(merged.top_k, Some(10));
        assert_eq!(merged.max_tokens, Some(512));
        assert_eq!(merged.top_p, Some(0.9));
        assert_eq!(merged.repeat_penalty, Some(1.1));
        assert!(merged.num_ctx.is_none());
    }

    #[test]
    fn merge_unions_extra_keys() {
        let base = defaults().extra("mirostat", 1).extra("num_thread", 4);
        let merged = base.merge(GenerationOptions::default().extra("num_thread", 8));

        assert_eq!(merged.extra.get("mirostat"), Some(&json!(1)));
        assert_eq!(merged.extra.get("num_thread"), Some(&json!(8)));
    }

    #[test]
    fn unset_fields_are_not_serialized() {
        let value = serde_json::to_value(GenerationOptions::default().temperature(0.2)).unwrap();
        assert_eq!(value, json!({ "temperature": 0.2 }));
    }

    #[test]
    fn from_value_routes_known_and_unknown_keys() {
        let opts = GenerationOptions::from_value(json!({
            "temperature": 0.5,
            "top_k": 7,
            "mirostat_eta": 0.3
        }))
        .unwrap();

        assert_eq!(opts.temperature, Some(0.5));
        assert_eq!(opts.top_k, Some(7));
        assert_eq!(opts.extra.get("mirostat_eta"), Some(&json!(0.3)));
        assert!(!opts.extra.contains_key("temperature"));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let value = serde_json::to_value(GenerationOptions::default().temperature(-3.0).top_p(7.5)).unwrap();
        assert_eq!(value, json!({ "temperature": -3.0, "top_p": 7.5 }));
    }
}
