//! Narrative tour steps shown above the map.
//!
//! A fixed sequence of regional highlights. Purely descriptive; the tour
//! has no effect on selection state.

/// One step of the guided tour.
#[derive(Debug)]
pub struct TourStep {
    pub title: &'static str,
    pub text: &'static str,
    pub tagline: &'static str,
    /// Padded numeric ids of the states this step focuses on; empty
    /// means the whole map.
    pub state_ids: &'static [&'static str],
}

const STEPS: &[TourStep] = &[
    TourStep {
        title: "United States overview",
        text: "Trade volume across all U.S. states. Use n/p to focus on specific regions.",
        tagline: "All states highlighted",
        state_ids: &[],
    },
    TourStep {
        title: "West Coast",
        text: "West Coast states (California, Oregon, Washington) often show distinct trading patterns.",
        tagline: "Focus: CA, OR, WA",
        state_ids: &["06", "41", "53"],
    },
    TourStep {
        title: "Northeast",
        text: "Northeastern states tend to cluster together on many socioeconomic indicators.",
        tagline: "Focus: CT, ME, MA, NH, NJ, NY, PA, RI, VT",
        state_ids: &["09", "23", "25", "33", "34", "36", "42", "44", "50"],
    },
    TourStep {
        title: "South",
        text: "Southern states present another regional pattern, with some of the highest and lowest volumes side by side.",
        tagline: "Focus: AL, AR, DE, FL, GA, KY, LA, MS, NC, SC, TN, TX",
        state_ids: &[
            "01", "05", "10", "12", "13", "21", "22", "28", "37", "45", "47", "48",
        ],
    },
];

/// Number of tour steps.
pub fn len() -> usize {
    STEPS.len()
}

/// The step at `index`, wrapping past the end.
pub fn step(index: usize) -> &'static TourStep {
    &STEPS[index % STEPS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_covers_whole_map() {
        assert!(step(0).state_ids.is_empty());
    }

    #[test]
    fn step_lookup_wraps() {
        assert_eq!(step(len()).title, step(0).title);
    }
}
