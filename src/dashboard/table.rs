//! The sortable transactions table of the listing page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    api::{Transaction, TransactionType},
    dashboard::{
        registry::ViewId,
        sort::{SortColumn, SortState},
    },
    endpoints::{self, format_endpoint},
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, format_date,
        loading_spinner,
    },
};

/// The max number of graphemes to display in a title cell before
/// truncating and displaying ellipses.
const MAX_TITLE_GRAPHEMES: usize = 48;

const INCOME_STYLE: &str = "text-[#12A454]";
const OUTCOME_STYLE: &str = "text-[#E83F5B]";

const CHEVRON_ACTIVE_STYLE: &str = "text-[#FF872C]";
const CHEVRON_INACTIVE_STYLE: &str = "text-gray-400";

fn format_title(title: &str) -> (String, Option<&str>) {
    let title_length = title.graphemes(true).count();

    if title_length <= MAX_TITLE_GRAPHEMES {
        (title.to_owned(), None)
    } else {
        let truncated: String = title.graphemes(true).take(MAX_TITLE_GRAPHEMES - 3).collect();
        (truncated + "...", Some(title))
    }
}

fn format_value(transaction: &Transaction) -> (String, &'static str) {
    match transaction.kind {
        TransactionType::Income => (format_currency(transaction.value), INCOME_STYLE),
        TransactionType::Outcome => (
            format!("- {}", format_currency(transaction.value)),
            OUTCOME_STYLE,
        ),
    }
}

fn chevron(is_ascending: bool) -> Markup {
    let (direction, style, points) = if is_ascending {
        ("up", CHEVRON_ACTIVE_STYLE, "18 15 12 9 6 15")
    } else {
        ("down", CHEVRON_INACTIVE_STYLE, "6 9 12 15 18 9")
    };

    html! {
        svg
            data-chevron=(direction)
            class={ "inline w-4 h-4 ms-1 " (style) }
            aria-hidden="true"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            xmlns="http://www.w3.org/2000/svg"
        {
            polyline points=(points) {}
        }
    }
}

fn column_header(view_id: ViewId, column: SortColumn, sort: SortState) -> Markup {
    let sort_endpoint = format_endpoint(
        &format_endpoint(endpoints::SORT_TRANSACTIONS, view_id),
        column,
    );
    let aria_sort = match sort.column {
        Some(active) if active == column && sort.ascending => Some("ascending"),
        Some(active) if active == column => Some("descending"),
        _ => None,
    };

    html! {
        th scope="col" class=(TABLE_CELL_STYLE) aria-sort=[aria_sort]
        {
            button
                type="button"
                data-sort-column=(column)
                hx-post=(sort_endpoint)
                hx-target="#transactions-table"
                hx-target-error="#alert-container"
                hx-swap="outerHTML"
                class="inline-flex items-center uppercase hover:text-[#FF872C]"
            {
                (column.label())
                (chevron(sort.is_ascending(column)))
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, local_timezone: &str) -> Markup {
    let (title, full_title) = format_title(&transaction.title);
    let (value, value_style) = format_value(transaction);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td
                class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
                title=[full_title]
            {
                (title)
            }
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap " (value_style) }
            {
                (value)
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category.title) }
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" }
            {
                (format_date(transaction.created_at, local_timezone))
            }
        }
    }
}

/// Render the transactions table in the given order.
///
/// The table is the target of its own sort buttons, so it is swapped out
/// as a whole whenever a column header is activated. While `is_loading`, an
/// empty table shows a spinner instead of the empty state.
pub(super) fn transactions_table(
    view_id: ViewId,
    transactions: &[Transaction],
    sort: SortState,
    local_timezone: &str,
    is_loading: bool,
) -> Markup {
    html! {
        section
            id="transactions-table"
            class="w-full mt-16 overflow-x-auto rounded-md shadow-sm"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in SortColumn::ALL {
                            (column_header(view_id, column, sort))
                        }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction, local_timezone))
                    }

                    @if transactions.is_empty() && is_loading {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan="4"
                                data-loading
                                class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                (loading_spinner())
                                "Carregando transações..."
                            }
                        }
                    } @else if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan="4"
                                data-empty-state
                                class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "Nenhuma transação encontrada."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::{
        api::{Transaction, TransactionType},
        dashboard::{
            registry::ViewId,
            sort::{SortColumn, SortState},
        },
        test_utils::{assert_hx_endpoint, select_texts, test_transaction},
    };

    use super::{format_title, transactions_table};

    const TIMEZONE: &str = "Etc/UTC";

    fn view_id() -> ViewId {
        ViewId::from(Uuid::nil())
    }

    fn render(transactions: &[Transaction], sort: SortState) -> Html {
        let table = transactions_table(view_id(), transactions, sort, TIMEZONE, false);

        Html::parse_fragment(&table.into_string())
    }

    fn outcome(mut transaction: Transaction) -> Transaction {
        transaction.kind = TransactionType::Outcome;
        transaction
    }

    #[test]
    fn renders_rows_in_given_order() {
        let transactions = [
            test_transaction("1", "B", 50.0, "Food", datetime!(2020-01-02 0:00 UTC)),
            outcome(test_transaction(
                "2",
                "A",
                30.0,
                "Bills",
                datetime!(2020-01-01 0:00 UTC),
            )),
        ];

        let html = render(&transactions, SortState::default());

        assert_eq!(select_texts(&html, "tbody tr td:first-child"), ["B", "A"]);
        assert_eq!(
            select_texts(&html, "tbody tr td:nth-child(2)"),
            ["R$ 50,00", "- R$ 30,00"]
        );
        assert_eq!(select_texts(&html, "tbody tr td:nth-child(3)"), ["Food", "Bills"]);
        assert_eq!(
            select_texts(&html, "tbody tr td:nth-child(4)"),
            ["02/01/2020", "01/01/2020"]
        );
    }

    #[test]
    fn rows_carry_transaction_ids() {
        let transactions = [
            test_transaction("abc", "B", 50.0, "Food", datetime!(2020-01-02 0:00 UTC)),
            test_transaction("def", "A", 30.0, "Bills", datetime!(2020-01-01 0:00 UTC)),
        ];

        let html = render(&transactions, SortState::default());

        let ids: Vec<&str> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .filter_map(|row| row.value().attr("data-transaction-id"))
            .collect();
        assert_eq!(ids, ["abc", "def"]);
    }

    #[test]
    fn income_and_outcome_are_coloured() {
        let transactions = [
            test_transaction("1", "Salário", 50.0, "Trabalho", datetime!(2020-01-02 0:00 UTC)),
            outcome(test_transaction(
                "2",
                "Aluguel",
                30.0,
                "Casa",
                datetime!(2020-01-01 0:00 UTC),
            )),
        ];

        let html = render(&transactions, SortState::default());

        let classes: Vec<&str> = html
            .select(&Selector::parse("tbody tr td:nth-child(2)").unwrap())
            .filter_map(|cell| cell.value().attr("class"))
            .collect();
        assert!(classes[0].contains("text-[#12A454]"), "income should be green");
        assert!(classes[1].contains("text-[#E83F5B]"), "outcome should be red");
    }

    #[test]
    fn empty_list_renders_empty_state_row() {
        let html = render(&[], SortState::default());

        let cell = html
            .select(&Selector::parse("tbody td[data-empty-state]").unwrap())
            .next()
            .expect("could not find empty state row");

        assert_eq!(cell.value().attr("colspan"), Some("4"));
        assert_eq!(cell.text().collect::<String>().trim(), "Nenhuma transação encontrada.");
    }

    #[test]
    fn loading_table_shows_spinner_instead_of_empty_state() {
        let table = transactions_table(view_id(), &[], SortState::default(), TIMEZONE, true);
        let html = Html::parse_fragment(&table.into_string());

        assert_eq!(
            select_texts(&html, "tbody td[data-loading]"),
            ["Carregando transações..."]
        );
        assert!(select_texts(&html, "tbody td[data-empty-state]").is_empty());
    }

    #[test]
    fn headers_post_to_sort_endpoints() {
        let html = render(&[], SortState::default());
        let view_id = view_id();

        let buttons: Vec<_> = html
            .select(&Selector::parse("thead th button").unwrap())
            .collect();

        assert_eq!(buttons.len(), 4);
        for (button, column) in buttons.into_iter().zip(SortColumn::ALL) {
            assert_eq!(
                button.text().collect::<String>().trim(),
                column.label(),
                "unexpected header order"
            );
            assert_hx_endpoint(
                &button,
                &format!("/views/{view_id}/sort/{column}"),
                "hx-post",
            );
            assert_eq!(button.value().attr("hx-target"), Some("#transactions-table"));
            assert_eq!(button.value().attr("hx-swap"), Some("outerHTML"));
        }
    }

    #[test]
    fn chevron_points_up_only_for_active_ascending_column() {
        let sort = SortState::default().activate(SortColumn::Price);

        let html = render(&[], sort);

        let directions: Vec<&str> = html
            .select(&Selector::parse("thead th svg").unwrap())
            .filter_map(|chevron| chevron.value().attr("data-chevron"))
            .collect();
        assert_eq!(directions, ["down", "up", "down", "down"]);
    }

    #[test]
    fn chevron_points_down_for_descending_column() {
        let sort = SortState::default()
            .activate(SortColumn::Title)
            .activate(SortColumn::Title);

        let html = render(&[], sort);

        let directions: Vec<&str> = html
            .select(&Selector::parse("thead th svg").unwrap())
            .filter_map(|chevron| chevron.value().attr("data-chevron"))
            .collect();
        assert_eq!(directions, ["down"; 4]);

        let aria_sort: Vec<&str> = html
            .select(&Selector::parse("thead th[aria-sort]").unwrap())
            .filter_map(|header| header.value().attr("aria-sort"))
            .collect();
        assert_eq!(aria_sort, ["descending"]);
    }

    #[test]
    fn long_titles_are_truncated() {
        let long_title = "á".repeat(60);
        let transactions = [test_transaction(
            "1",
            &long_title,
            1.0,
            "Outros",
            datetime!(2020-01-01 0:00 UTC),
        )];

        let html = render(&transactions, SortState::default());

        let cell = html
            .select(&Selector::parse("tbody td:first-child").unwrap())
            .next()
            .unwrap();
        let text = cell.text().collect::<String>();
        assert!(text.trim().ends_with("..."));
        assert_eq!(cell.value().attr("title"), Some(long_title.as_str()));
    }

    #[test]
    fn short_titles_are_kept() {
        assert_eq!(format_title("Mercado"), ("Mercado".to_owned(), None));
    }

    #[test]
    fn truncation_counts_graphemes() {
        let title = "👍🏽".repeat(48);

        assert_eq!(format_title(&title), (title.clone(), None));
    }
}
