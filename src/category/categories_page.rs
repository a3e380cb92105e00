//! Lists income and expense categories.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    category::{
        core::{Category, CategoryType},
        service::CategoryService,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_LINK_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base, edit_delete_action_links,
        empty_state, error_state,
    },
    navigation::NavBar,
};

/// Renders the categories page.
pub async fn get_categories_page(State(service): State<CategoryService>) -> Response {
    match service.get_all().await {
        Ok(categories) => page(&categories_view(&categories)).into_response(),
        Err(error) => {
            tracing::error!("could not load categories: {error}");

            let content = error_state("Failed to load categories", endpoints::CATEGORIES_VIEW);
            (StatusCode::INTERNAL_SERVER_ERROR, page(&content)).into_response()
        }
    }
}

fn page(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(BUTTON_LINK_STYLE)
                    {
                        "Add Category"
                    }
                }

                (content)
            }
        }
    };

    base("Categories", &[], &content)
}

fn categories_view(categories: &[Category]) -> Markup {
    if categories.is_empty() {
        return empty_state(
            "No categories yet",
            "Categories group your transactions and budgets.",
            Some((endpoints::NEW_CATEGORY_VIEW, "Add Category")),
        );
    }

    html! {
        div class="grid grid-cols-1 md:grid-cols-2 gap-6"
        {
            @for category_type in CategoryType::ALL {
                (category_section(category_type, categories))
            }
        }
    }
}

fn category_section(category_type: CategoryType, categories: &[Category]) -> Markup {
    let categories: Vec<&Category> = categories
        .iter()
        .filter(|category| category.category_type == category_type)
        .collect();

    html! {
        section class=(CARD_STYLE) data-category-section=(category_type.as_str())
        {
            h2 class="mb-3 text-lg font-semibold"
            {
                (category_type.label()) " Categories"
            }

            @if categories.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "No " (category_type.as_str()) " categories"
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for category in categories {
                        (category_row(category))
                    }
                }
            }
        }
    }
}

fn category_row(category: &Category) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
    let delete_url = format_endpoint(endpoints::CATEGORY_API, category.id);

    html! {
        li class="flex items-center justify-between gap-3 py-3" data-category-row="true"
        {
            div class="flex items-center gap-3"
            {
                span
                    class="inline-block w-4 h-4 rounded-full"
                    style=(format!("background-color: {}", category.color))
                    aria-hidden="true"
                {}

                div
                {
                    p class="font-medium" { (category.name) }
                    p class="text-xs text-gray-500 dark:text-gray-400" { (category.icon) }
                }
            }

            (edit_delete_action_links(
                &edit_url,
                &delete_url,
                &format!("Are you sure you want to delete \"{}\"?", category.name),
                "closest [data-category-row='true']",
                "delete",
            ))
        }
    }
}
