//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will be underlined if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block pb-2.5 text-white border-b-2 border-[#FF872C]"
        } else {
            "block pb-2.5 text-white opacity-80 hover:opacity-100 border-b-2 border-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and underlined in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Listagem",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::IMPORT_VIEW,
                title: "Importar",
                is_current: active_endpoint == endpoints::IMPORT_VIEW,
            },
        ];

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            header class="bg-[#5636D3]"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto px-6 py-8"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        img
                            src="/static/logo.svg"
                            alt="GoFinances"
                            class="h-8"
                        ;
                    }

                    nav
                    {
                        ul class="flex flex-row space-x-8 font-medium"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use scraper::{Html, Selector};

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::ROOT, true);
        cases.insert(endpoints::IMPORT_VIEW, true);

        cases.insert(endpoints::DASHBOARD_CONTENT, false);
        cases.insert(endpoints::INTERNAL_ERROR_VIEW, false);
        cases.insert(endpoints::IMPORT, false);
        cases.insert("/does-not-exist", false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[test]
    fn only_current_link_is_underlined() {
        let html = NavBar::new(endpoints::IMPORT_VIEW).into_html().into_string();
        let html = Html::parse_fragment(&html);

        let current_links: Vec<_> = html
            .select(&Selector::parse("nav a[aria-current='page']").unwrap())
            .collect();

        assert_eq!(current_links.len(), 1, "want exactly one current link");
        let link = current_links[0];
        assert_eq!(link.value().attr("href"), Some(endpoints::IMPORT_VIEW));
        assert_eq!(link.text().collect::<String>(), "Importar");
        assert!(
            link.value()
                .attr("class")
                .unwrap_or_default()
                .contains("border-[#FF872C]"),
            "current link should be underlined"
        );
    }

    #[test]
    fn renders_listing_and_import_links() {
        let html = NavBar::new(endpoints::ROOT).into_html().into_string();
        let html = Html::parse_fragment(&html);

        let titles: Vec<String> = html
            .select(&Selector::parse("nav a").unwrap())
            .map(|link| link.text().collect())
            .collect();

        assert_eq!(titles, ["Listagem", "Importar"]);
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
