#![allow(dead_code)]

use cartage_core::cartfile::Cartfile;
use cartage_core::dependency::Dependency;
use cartage_resolver::fetch::MapFetcher;

pub const VALID_RESOLVED: &str = r#"github "Alamofire/Alamofire" "4.6.0"
github "CocoaLumberjack/CocoaLumberjack" "3.4.1"
github "Moya/Moya" "10.0.2"
github "ReactiveCocoa/ReactiveSwift" "2.0.1"
github "ReactiveX/RxSwift" "4.1.2"
github "antitypical/Result" "3.2.4"
github "yapstudios/YapDatabase" "3.0.2"
"#;

pub const INVALID_RESOLVED: &str = r#"github "Alamofire/Alamofire" "5.0.0"
github "CocoaLumberjack/CocoaLumberjack" "gitcommit"
github "Moya/Moya" "10.0.2"
github "ReactiveCocoa/ReactiveSwift" "2.0.1"
github "ReactiveX/RxSwift" "4.1.2"
github "antitypical/Result" "4.0.0"
github "yapstudios/YapDatabase" "3.0.2"
"#;

pub const MOYA_CARTFILE: &str = r#"github "Alamofire/Alamofire" ~> 4.1
github "antitypical/Result" ~> 3.1
github "ReactiveCocoa/ReactiveSwift" ~> 2.0
github "ReactiveX/RxSwift" ~> 4.0
"#;

pub const REACTIVE_SWIFT_CARTFILE: &str = r#"github "antitypical/Result" ~> 3.2.1
"#;

pub const YAP_DATABASE_CARTFILE: &str = r#"github "CocoaLumberjack/CocoaLumberjack" ~> 3.0
"#;

/// Requirements on packages that never appear in the resolved manifests.
pub const RX_SWIFT_CARTFILE: &str = r#"# test-only dependencies
github "Quick/Quick" ~> 1.2
github "Quick/Nimble" ~> 7.0
"#;

pub fn moya() -> Dependency {
    Dependency::github("Moya", "Moya")
}

pub fn result() -> Dependency {
    Dependency::github("antitypical", "Result")
}

pub fn alamofire() -> Dependency {
    Dependency::github("Alamofire", "Alamofire")
}

pub fn reactive_swift() -> Dependency {
    Dependency::github("ReactiveCocoa", "ReactiveSwift")
}

pub fn rx_swift() -> Dependency {
    Dependency::github("ReactiveX", "RxSwift")
}

pub fn yap_database() -> Dependency {
    Dependency::github("yapstudios", "YapDatabase")
}

pub fn cocoa_lumberjack() -> Dependency {
    Dependency::github("CocoaLumberjack", "CocoaLumberjack")
}

fn cartfile(text: &str) -> Cartfile {
    text.parse().unwrap()
}

/// The published manifests of the packages pinned in the fixtures.
pub fn fetcher() -> MapFetcher {
    MapFetcher::new()
        .with_cartfile(moya(), cartfile(MOYA_CARTFILE))
        .with_cartfile(reactive_swift(), cartfile(REACTIVE_SWIFT_CARTFILE))
        .with_cartfile(yap_database(), cartfile(YAP_DATABASE_CARTFILE))
        .with_cartfile(rx_swift(), cartfile(RX_SWIFT_CARTFILE))
}
