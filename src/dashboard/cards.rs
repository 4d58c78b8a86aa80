//! The income, outcome and total balance cards above the transactions table.

use maud::{Markup, html};

use crate::{api::Balance, html::format_balance};

struct BalanceCard<'a> {
    title: &'a str,
    test_id: &'a str,
    icon: &'a str,
    amount: Option<f64>,
    highlighted: bool,
}

impl BalanceCard<'_> {
    fn into_html(self) -> Markup {
        let (card_style, title_style) = if self.highlighted {
            ("bg-[#FF872C] text-white", "text-white")
        } else {
            (
                "bg-white dark:bg-gray-800 text-[#363F5F] dark:text-white",
                "text-[#363F5F] dark:text-gray-300",
            )
        };

        html! {
            div class={ "rounded-md px-8 py-6 shadow-sm " (card_style) }
            {
                header class="flex items-center justify-between"
                {
                    p class={ "text-base " (title_style) } { (self.title) }
                    img src=(self.icon) alt=(self.title) class="h-8 w-8";
                }

                h1
                    data-testid=(self.test_id)
                    class="mt-3.5 min-h-[54px] text-4xl font-medium leading-[54px]"
                {
                    (format_balance(self.amount))
                }
            }
        }
    }
}

/// Render the three balance cards.
///
/// Amounts that are zero or missing leave the card's value blank.
pub(super) fn balance_cards(balance: &Balance) -> Markup {
    let cards = [
        BalanceCard {
            title: "Entradas",
            test_id: "balance-income",
            icon: "/static/income.svg",
            amount: balance.income,
            highlighted: false,
        },
        BalanceCard {
            title: "Saídas",
            test_id: "balance-outcome",
            icon: "/static/outcome.svg",
            amount: balance.outcome,
            highlighted: false,
        },
        BalanceCard {
            title: "Total",
            test_id: "balance-total",
            icon: "/static/total.svg",
            amount: balance.total,
            highlighted: true,
        },
    ];

    html! {
        section
            id="balance-cards"
            class="grid grid-cols-1 md:grid-cols-3 gap-8 w-full"
        {
            @for card in cards {
                (card.into_html())
            }
        }
    }
}
