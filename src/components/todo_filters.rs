//! Todo Filters Component
//!
//! Search box and status select. The filtered view is recomputed on every
//! change and pushed to the parent through `on_filter`.

use leptos::prelude::*;
use todo_core::{CachedTodo, FilterSummary, StatusFilter, TodoFilter};

#[component]
pub fn TodoFilters(
    #[prop(into)] todos: Signal<Vec<CachedTodo>>,
    #[prop(into)] on_filter: Callback<Vec<CachedTodo>>,
) -> impl IntoView {
    let filter = RwSignal::new(TodoFilter::default());
    let filtered = Memo::new(move |_| {
        let current = filter.get();
        todos.with(|list| current.apply(list))
    });
    let summary = Memo::new(move |_| todos.with(|list| FilterSummary::of(list)));

    Effect::new(move |_| on_filter.run(filtered.get()));

    let shown = move || filtered.with(|list| list.len());

    view! {
        <div class="todo-filters">
            <input
                type="search"
                class="search-input"
                placeholder="Search todos..."
                aria-label="Search todos"
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.search = value);
                }
            />

            <div class="filter-controls">
                <label for="status-filter">"Status:"</label>
                <select
                    id="status-filter"
                    prop:value=move || filter.with(|f| f.status.as_str())
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<StatusFilter>() {
                            Ok(status) => filter.update(|f| f.status = status),
                            Err(err) => log::warn!("[FILTER] {}", err),
                        }
                    }
                >
                    {StatusFilter::ALL.iter().map(|status| view! {
                        <option value=status.as_str()>{status.label()}</option>
                    }).collect_view()}
                </select>

                <span class="filter-count">{move || format!("Total: {}", summary.get().total)}</span>
                <span class="filter-count">{move || format!("Completed: {}", summary.get().completed)}</span>
                <span class="filter-count">{move || format!("Incomplete: {}", summary.get().incomplete)}</span>

                <Show when=move || filter.with(|f| f.is_active())>
                    <button
                        type="button"
                        class="clear-filters-btn"
                        on:click=move |_| filter.update(|f| f.clear())
                    >
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <Show when=move || shown() != summary.get().total>
                <p class="results-count">
                    {move || format!("Showing {} of {} todos", shown(), summary.get().total)}
                </p>
            </Show>
        </div>
    }
}
