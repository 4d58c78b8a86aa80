use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
};

fn import_form_view() -> Markup {
    let import_route = endpoints::IMPORT;
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(import_route)
            enctype="multipart/form-data"
            hx-disabled-elt="#files, #submit-button"
            hx-indicator="#indicator"
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="files"
                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Importar uma transação"
                }

                input
                    id="files"
                    type="file"
                    name="files"
                    accept=".csv,text/csv"
                    multiple
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Permitido apenas arquivos CSV."
                }
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Enviar"
            }
        }
    }
}

fn import_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();
    let form = import_form_view();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-xl"
            {
                (form)
            }
        }
    };

    base("Importar", &[], &content)
}

/// Route handler for the import CSV page.
pub async fn get_import_page() -> Response {
    import_view().into_response()
}
