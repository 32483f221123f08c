//! Loading Skeleton Component

use leptos::prelude::*;

/// Placeholder rows shown on the first load
const SKELETON_ROWS: usize = 5;

#[component]
pub fn LoadingSkeleton() -> impl IntoView {
    view! {
        <div class="loading-skeleton" aria-busy="true" aria-label="Loading todos">
            {(0..SKELETON_ROWS).map(|_| view! {
                <div class="skeleton-row">
                    <span class="skeleton-box"></span>
                    <span class="skeleton-line"></span>
                </div>
            }).collect_view()}
        </div>
    }
}
