// templates/pages/home.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Assumable Listings",
        html! {
            main class="homepage" {
                h1 {
                    "Didn’t get a low rate " i { "in" } " 2021?"
                    br;
                    "Get a low rate " b { i { "from" } } " 2021."
                }
                p {
                    "Shop homes with assumable mortgages at " b { "rates as low as 3%." }
                }
                a href="/listings" class="homepage-button" { "View Listings" }
            }
        },
    )
}
