//! Candidate locators for the listing panel and the detail view.
//!
//! Each field is tried against its candidates in order; the first one that
//! yields non-empty text wins. The class names are the ones the maps UI
//! renders today and are expected to drift.

use crate::page::Locator;

pub const SEARCH_BOX: Locator = Locator::xpath(r#"//input[@id="searchboxinput"]"#);

pub const RESULT_LINK: Locator =
    Locator::xpath(r#"//a[contains(@href, "https://www.google.com/maps/place")]"#);

/// Present once a listing's detail view has rendered its title.
pub const DETAIL_READY: Locator =
    Locator::xpath(r#"//div[@class="TIHn2 "]//h1[@class="DUwDvf lfPIob"]"#);

pub const NAME: &[Locator] = &[
    Locator::xpath(r#"//div[@class="TIHn2 "]//h1[@class="DUwDvf lfPIob"]"#),
    Locator::xpath(r#"//h1[@class="DUwDvf lfPIob"]"#),
    Locator::xpath(r#"//h1[contains(@class, "DUwDvf")]"#),
];

pub const ADDRESS: &[Locator] = &[
    Locator::xpath(r#"//button[@data-item-id="address"]//div[contains(@class, "fontBodyMedium")]"#),
    Locator::xpath(
        r#"//button[contains(@data-item-id, "address")]//div[contains(@class, "fontBodyMedium")]"#,
    ),
    Locator::xpath(r#"//div[contains(@class, "Io6YTe")]"#),
];

pub const WEBSITE: &[Locator] = &[
    Locator::xpath(r#"//a[@data-item-id="authority"]//div[contains(@class, "fontBodyMedium")]"#),
    Locator::xpath(
        r#"//a[contains(@data-item-id, "authority")]//div[contains(@class, "fontBodyMedium")]"#,
    ),
    Locator::xpath(r#"//a[contains(@href, "http")]//div[contains(@class, "fontBodyMedium")]"#),
];

pub const PHONE: &[Locator] = &[
    Locator::xpath(
        r#"//button[contains(@data-item-id, "phone:tel:")]//div[contains(@class, "fontBodyMedium")]"#,
    ),
    Locator::xpath(
        r#"//button[contains(@aria-label, "phone") or contains(@aria-label, "Phone")]//div[contains(@class, "fontBodyMedium")]"#,
    ),
    Locator::xpath(r#"//div[contains(text(), "+91") or contains(text(), "04")]"#),
];

pub const REVIEW_COUNT: &[Locator] = &[
    Locator::xpath(
        r#"//div[@class="TIHn2 "]//div[@class="fontBodyMedium dmRWX"]//div//span//span//span[@aria-label]"#,
    ),
    Locator::xpath(r#"//span[contains(@aria-label, "reviews") or contains(@aria-label, "review")]"#),
    Locator::xpath(r#"//span[contains(text(), "review")]"#),
];

pub const RATING: &[Locator] = &[
    Locator::xpath(
        r#"//div[@class="TIHn2 "]//div[@class="fontBodyMedium dmRWX"]//div//span[@aria-hidden]"#,
    ),
    Locator::xpath(r#"//span[@aria-hidden="true" and contains(text(), ".")]"#),
    Locator::xpath(r#"//div[contains(@class, "fontDisplayLarge")]//span"#),
];

pub const PLACE_TYPE: &[Locator] = &[
    Locator::xpath(r#"//div[@class="LBgpqf"]//button[@class="DkEaL "]"#),
    Locator::xpath(r#"//button[contains(@class, "DkEaL")]"#),
    Locator::xpath(r#"//div[contains(@class, "LBgpqf")]//button"#),
];

pub const INTRODUCTION: &[Locator] = &[
    Locator::xpath(r#"//div[@class="WeS02d fontBodyMedium"]//div[@class="PYvSYb "]"#),
    Locator::xpath(r#"//div[contains(@class, "PYvSYb")]"#),
    Locator::xpath(r#"//div[contains(@class, "WeS02d")]"#),
];

pub const PRICE_RANGE: &[Locator] = &[
    Locator::xpath(r#"//span[contains(@aria-label, "Price") or contains(@aria-label, "price")]"#),
    Locator::xpath(r#"//span[contains(text(), "₹")]"#),
];

pub const HOURS: &[Locator] = &[
    Locator::xpath(r#"//button[contains(@data-item-id, "oh")]//div[contains(@class, "fontBodyMedium")]"#),
    Locator::xpath(r#"//div[@class="MkV9"]//span[@class="ZDu9vd"]//span[2]"#),
    Locator::xpath(r#"//div[contains(@class, "MkV9")]//span[contains(@class, "ZDu9vd")]"#),
];

/// Short service-option snippets such as `"Bakery · Dine-in · Takeaway"`.
pub const SERVICE_SNIPPETS: &[Locator] = &[
    Locator::xpath(r#"//div[@class="LTs0Rc"]"#),
    Locator::xpath(r#"//div[contains(@class, "LTs0Rc")]"#),
    Locator::xpath(r#"//div[contains(@class, "etWJQ")]//div[contains(@class, "BNeawe")]"#),
];

pub const PHOTO_BUTTON: Locator = Locator::xpath(
    r#"//button[contains(@aria-label, "photo") or contains(@aria-label, "Photo")]"#,
);

pub const POPULAR_TIMES: Locator = Locator::xpath(
    r#"//div[contains(text(), "Popular times") or contains(text(), "popular times")]"#,
);

pub const VERIFIED_BADGE: Locator =
    Locator::xpath(r#"//*[contains(text(), "verified") or contains(text(), "Verified")]"#);
