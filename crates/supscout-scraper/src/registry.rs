//! Source registry: every directory the collector queries, plus the CSS
//! selector hints for the handful of sources whose markup is known.
//!
//! The registry is built once and only ever read afterwards, so it can be
//! shared across concurrent requests without synchronization.

use std::collections::HashMap;
use std::sync::LazyLock;

use scraper::Selector;

use crate::error::ScoutError;

/// Placeholder replaced by the URL-encoded query in every template.
pub const QUERY_PLACEHOLDER: &str = "{q}";

/// `(display name, URL template)` for each built-in source, in query order.
pub(crate) const BUILTIN_SOURCES: &[(&str, &str)] = &[
    // Major B2B platforms
    ("Alibaba", "https://www.alibaba.com/trade/search?fsb=y&IndexArea=product_en&searchText={q}"),
    ("Made-in-China", "https://www.made-in-china.com/search?word={q}"),
    ("GlobalSources", "https://www.globalsources.com/searchList?query={q}"),
    ("1688 (via Baidu)", "https://www.baidu.com/s?wd={q}+site:1688.com"),
    ("HKTDC", "https://sourcing.hktdc.com/Search-Product?keyword={q}"),
    ("ECVV", "https://www.ecvv.com/catalog/{q}.html"),
    ("ECER", "https://www.ecer.com/search?kw={q}"),
    ("HC360", "https://s.hc360.com/seller/search.html?kwd={q}"),
    ("DHgate", "https://www.dhgate.com/wholesale/search.do?act=search&searchkey={q}"),
    ("YiwuGo", "https://en.yiwugo.com/search/{q}.html"),
    ("TradeKey", "https://www.tradekey.com/suppliers/{q}.html"),
    ("ExportHub", "https://www.exporthub.com/search?q={q}"),
    ("TradeWheel", "https://www.tradewheel.com/search/{q}/"),
    ("En.China.cn", "https://en.china.cn/search.html?searchKey={q}"),
    ("Hisupplier", "https://www.hisupplier.com/wholesale/{q}/"),
    ("Epoly", "https://www.etwinternational.com/search?kw={q}"),
    ("Globalspec", "https://www.globalspec.com/Search/Results?query={q}"),
    ("ThomasNet", "https://www.thomasnet.com/search.html?what={q}"),
    ("Kompass", "https://us.kompass.com/en/searchCompanies/companies/{q}/"),
    ("Qcc (companies)", "https://www.qcc.com/web/search?key={q}"),
    ("Tianyancha", "https://www.tianyancha.com/search?key={q}"),
    // Chinese marketplaces
    ("JD", "https://search.jd.com/Search?keyword={q}"),
    ("Taobao", "https://s.taobao.com/search?q={q}"),
    ("Pinduoduo", "https://mobile.yangkeduo.com/search_result.html?search_key={q}"),
    // Niche verticals and search-engine backups
    ("MFG", "https://www.mfg.com/en/search/?q={q}"),
    ("AliExpress B2B", "https://www.aliexpress.com/wholesale?SearchText={q}"),
    ("Globalsources Verified", "https://www.globalsources.com/searchList?query={q}&verifiedSupplier=true"),
    ("Baidu Baike", "https://baike.baidu.com/search?word={q}"),
    ("Sogou", "https://www.sogou.com/web?query={q}"),
    ("Bing China", "https://cn.bing.com/search?q={q}"),
    ("Google (backup)", "https://www.google.com/search?q={q}"),
    // Aggregators and regional directories
    ("E-WorldTrade", "https://www.eworldtrade.com/search/{q}/"),
    ("China.cn", "https://www.china.cn/search.html?searchKey={q}"),
    ("B2BManufactures", "https://www.manufacturers.com.tw/search.php?words={q}"),
    ("Maker-In-China", "https://www.maker-in-china.com/search.html?kw={q}"),
    ("Manufacturers Directory", "https://www.manufacturersdirectory.com/search?query={q}"),
    ("IndiaMART", "https://dir.indiamart.com/search.mp?ss={q}"),
    ("TradeIndia", "https://www.tradeindia.com/search.html?search_text={q}"),
    ("ECPlaza", "https://www.ecplaza.net/search/1?keyword={q}"),
    ("YellowPages", "https://www.yellowpages.com/search?search_terms={q}"),
    ("B2Brazil", "https://b2brazil.com/hotsite/search?term={q}"),
    ("B2BMit", "https://www.b2bmit.com/search.html?q={q}"),
    ("Globalsources Suppliers", "https://www.globalsources.com/suppliers?query={q}"),
    ("AliBaba Suppliers", "https://www.alibaba.com/company_directory/search/{q}.html"),
    ("CantonFair", "https://www.cantonfair.org.cn/en-US/search?key={q}"),
    ("HKTDC Suppliers", "https://sourcing.hktdc.com/en/supplier-search/{q}"),
    ("Europages", "https://www.europages.com/companies/{q}.html"),
    ("Kompass CN", "https://cn.kompass.com/en/searchCompanies/companies/{q}/"),
    ("Made-in-China Companies", "https://www.made-in-china.com/company-search/?word={q}"),
    ("MIC Verified", "https://www.made-in-china.com/company-search/?word={q}&select=verified"),
    ("GlobalMarket", "https://www.globalmarket.com/search/{q}.html"),
    ("EtradeAsia", "https://www.etradeasia.com/search?keyword={q}"),
    ("Mawoo", "https://www.made-in-asia.net/search?kw={q}"),
    ("EveryChina", "https://www.everychina.com/search.html?kw={q}"),
    ("ChinaProducts", "https://www.china-products-manufacturers.com/search?keyword={q}"),
    ("Crov", "https://www.crov.com/search?q={q}"),
    ("DiyTrade", "https://www.diytrade.com/china/search/products.do?keyword={q}"),
    ("Okchem", "https://www.okchem.com/search?keyword={q}"),
    ("ChemNet", "https://www.chemnet.com/global/en/search.html?keyword={q}"),
    ("Food2China", "https://www.food2china.com/search?keyword={q}"),
    ("PharmaSources", "https://www.pharmasources.com/searchResult?keyword={q}"),
    ("MedicaTradeFair", "https://www.medica-tradefair.com/vis/v1/en/search?term={q}"),
    ("HKTDC Products", "https://sourcing.hktdc.com/Search-Product?keyword={q}&productonly=1"),
    // Social and video search surfaces
    ("Xiaohongshu", "https://www.xiaohongshu.com/search_result?keyword={q}"),
    ("Weixin", "https://weixin.sogou.com/weixin?type=2&query={q}"),
    ("Bilibili", "https://search.bilibili.com/all?keyword={q}"),
    ("Weibo", "https://s.weibo.com/weibo?q={q}"),
    ("LinkedIn", "https://www.linkedin.com/search/results/companies/?keywords={q}"),
    ("Pinterest", "https://www.pinterest.com/search/pins/?q={q}"),
    ("YouTube", "https://www.youtube.com/results?search_query={q}"),
];

/// `(source name, [(title selector, link selector)])` for sources with known markup.
pub(crate) const BUILTIN_HINTS: &[(&str, &[(&str, &str)])] = &[
    ("Alibaba", &[(".organic-gallery-title", ".organic-gallery-title a")]),
    ("Made-in-China", &[(".company-name a", ".company-name a")]),
    ("GlobalSources", &[("a.gs-product-card__name", "a.gs-product-card__name")]),
    ("1688 (via Baidu)", &[("h3.t a", "h3.t a")]),
    (
        "HKTDC",
        &[(".product-name a, .cmpny-name a", ".product-name a, .cmpny-name a")],
    ),
    (
        "ECER",
        &[(".pro-title a, .supplier-name a", ".pro-title a, .supplier-name a")],
    ),
    ("ECVV", &[(".pro-title a, .company a", ".pro-title a, .company a")]),
    ("HC360", &[(".search-list .title a", ".search-list .title a")]),
    ("DHgate", &[(".item-title a", ".item-title a")]),
    ("YiwuGo", &[(".title a", ".title a")]),
    ("TradeWheel", &[(".item-title a", ".item-title a")]),
    ("ExportHub", &[("h4.media-heading a", "h4.media-heading a")]),
];

/// One queryable source: a display name and a URL template with a `{q}` slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub template: String,
}

impl Source {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// Substitute an already-encoded query into the template.
    #[must_use]
    pub fn locator(&self, encoded_query: &str) -> String {
        self.template.replace(QUERY_PLACEHOLDER, encoded_query)
    }
}

/// A compiled `(title selector, link selector)` pair.
#[derive(Debug, Clone)]
pub struct FieldHint {
    pub title: Selector,
    pub link: Selector,
}

impl FieldHint {
    /// Compile a selector pair for `source_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidSelector`] if either selector does not parse.
    pub fn parse(source_name: &str, title: &str, link: &str) -> Result<Self, ScoutError> {
        Ok(Self {
            title: parse_selector(source_name, title)?,
            link: parse_selector(source_name, link)?,
        })
    }
}

fn parse_selector(source_name: &str, selector: &str) -> Result<Selector, ScoutError> {
    Selector::parse(selector).map_err(|e| ScoutError::InvalidSelector {
        source_name: source_name.to_string(),
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Read-only table of sources and their optional field hints.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    hints: HashMap<String, Vec<FieldHint>>,
}

static BUILTIN: LazyLock<SourceRegistry> = LazyLock::new(|| {
    let sources = BUILTIN_SOURCES
        .iter()
        .map(|(name, template)| Source::new(*name, *template))
        .collect();
    let mut registry = SourceRegistry::new(sources);
    for (name, pairs) in BUILTIN_HINTS {
        for (title, link) in *pairs {
            registry
                .add_hint(name, title, link)
                .expect("built-in selector hints are valid");
        }
    }
    registry
});

impl SourceRegistry {
    #[must_use]
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources,
            hints: HashMap::new(),
        }
    }

    /// The process-wide registry of built-in sources.
    #[must_use]
    pub fn builtin() -> &'static SourceRegistry {
        &BUILTIN
    }

    /// Append a selector hint for `source_name`. Hints apply in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidSelector`] if either selector does not parse.
    pub fn add_hint(
        &mut self,
        source_name: &str,
        title: &str,
        link: &str,
    ) -> Result<(), ScoutError> {
        let hint = FieldHint::parse(source_name, title, link)?;
        self.hints
            .entry(source_name.to_string())
            .or_default()
            .push(hint);
        Ok(())
    }

    /// Builder-style [`add_hint`](Self::add_hint).
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidSelector`] if either selector does not parse.
    pub fn with_hint(mut self, source_name: &str, title: &str, link: &str) -> Result<Self, ScoutError> {
        self.add_hint(source_name, title, link)?;
        Ok(self)
    }

    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    #[must_use]
    pub fn hints_for(&self, source_name: &str) -> Option<&[FieldHint]> {
        self.hints.get(source_name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
