//! The form shared by the create and edit category pages.

use maud::{Markup, html};

use crate::{
    category::core::{CategoryForm, CategoryType, ICONS},
    form::{FieldErrors, FormTarget},
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, field_error, labelled_field, submit_button,
    },
};

pub(super) fn category_form_view(
    form: &CategoryForm,
    errors: &FieldErrors,
    target: &FormTarget,
) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Add Category",
        FormTarget::Update(_) => "Save Changes",
    };

    html! {
        form
            hx-post=[target.post_url()]
            hx-put=[target.put_url()]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (labelled_field("name", "Category Name", html! {
                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g., Groceries"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("name")))

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for category_type in CategoryType::ALL {
                        @let id = format!("type-{category_type}");

                        div class="flex-1"
                        {
                            input
                                id=(id)
                                type="radio"
                                name="type"
                                value=(category_type.as_str())
                                checked[form.category_type == category_type.as_str()]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (category_type.label()) }
                        }
                    }
                }

                (field_error("type", errors.get("type")))
            }

            div class="grid grid-cols-2 gap-4"
            {
                (labelled_field("color", "Colour", html! {
                    input
                        id="color"
                        type="color"
                        name="color"
                        value=(form.color)
                        class="block w-full h-10 rounded cursor-pointer";
                }, errors.get("color")))

                (labelled_field("icon", "Icon", html! {
                    select id="icon" name="icon" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for icon in ICONS {
                            option value=(icon) selected[form.icon == icon] { (icon) }
                        }
                    }
                }, errors.get("icon")))
            }

            (submit_button(submit_text))
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        category::{core::CategoryForm, form::category_form_view},
        form::{FieldErrors, FormTarget},
        test_utils::{
            assert_field_error, assert_form_input_with_value, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_no_field_errors, assert_selected_option, assert_valid_html,
            must_get_form,
        },
    };

    fn checked_type(html: &Html) -> Option<String> {
        html.select(&Selector::parse("input[name='type'][checked]").unwrap())
            .next()
            .and_then(|input| input.value().attr("value").map(str::to_owned))
    }

    #[test]
    fn new_category_defaults_to_expense() {
        let html = category_form_view(
            &CategoryForm::new_category(),
            &FieldErrors::default(),
            &FormTarget::Create("/api/categories".to_owned()),
        )
        .into_string();
        let html = Html::parse_fragment(&html);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/categories", "hx-post");
        assert_selected_option(&form, "icon", "ShoppingCart");
        assert_no_field_errors(&form);
        assert_form_submit_button_with_text(&form, "Add Category");
        assert_eq!(checked_type(&html).as_deref(), Some("expense"));
    }

    #[test]
    fn edit_form_shows_values_and_errors() {
        let values = CategoryForm {
            name: "Salary".to_owned(),
            category_type: "income".to_owned(),
            color: "#10B981".to_owned(),
            icon: "Briefcase".to_owned(),
        };
        let mut errors = FieldErrors::default();
        errors.add("color", "Color must be a hex colour like #3B82F6");

        let html = category_form_view(
            &values,
            &errors,
            &FormTarget::Update("/api/categories/4".to_owned()),
        )
        .into_string();
        let html = Html::parse_fragment(&html);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/categories/4", "hx-put");
        assert_form_input_with_value(&form, "name", "text", "Salary");
        assert_selected_option(&form, "icon", "Briefcase");
        assert_field_error(&form, "color", "Color must be a hex colour like #3B82F6");
        assert_eq!(checked_type(&html).as_deref(), Some("income"));
    }
}
