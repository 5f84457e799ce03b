//! Month Bar Component
//!
//! Twelve colored segments for bloom and leaf-change months.

use leptos::prelude::*;

use plant_core::season::{SeasonCalendar, BLOOM_COLOR, LEAF_COLOR};

#[component]
pub fn MonthBar(
    calendar: SeasonCalendar,
    /// Show the color legend under the bar
    #[prop(optional)]
    legend: bool,
) -> impl IntoView {
    let segments = calendar
        .months()
        .iter()
        .enumerate()
        .map(|(i, class)| {
            let style = format!("background: {};", class.swatch());
            view! { <div class="month-seg" style=style title=format!("Month {}", i + 1)></div> }
        })
        .collect_view();

    view! {
        <div class="month-bar">{segments}</div>
        <Show when=move || legend>
            <div class="month-legend">
                <span style=format!("color:{}", BLOOM_COLOR)>"▇"</span>
                " Bloom "
                <span style=format!("color:{};margin-left:8px", LEAF_COLOR)>"▇"</span>
                " Leaf change"
            </div>
        </Show>
    }
}
