//! Tests for the attraction browsing service.

use std::collections::HashSet;
use std::sync::Arc;

use mockall::predicate::{always, eq};
use pagination::{PageRequest, PageSlot};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{ListView, MockTourSource, PaginationMode};
use crate::domain::{ContentType, ErrorCode, PetTourInfo, TourDetail, TourImage, TourIntro};

fn item(id: &str, title: &str, modified: &str) -> TourItem {
    TourItem {
        content_id: id.to_owned(),
        content_type_id: "12".to_owned(),
        title: title.to_owned(),
        area_code: Some("1".to_owned()),
        map_x: "126.9769930325".to_owned(),
        map_y: "37.5788222356".to_owned(),
        modified_time: Some(modified.to_owned()),
        ..TourItem::default()
    }
}

fn page(items: Vec<TourItem>, total_count: u64) -> TourPage {
    TourPage { items, total_count }
}

#[fixture]
fn query() -> TourListQuery {
    TourListQuery {
        page: PageRequest::first(),
        ..TourListQuery::default()
    }
}

fn service(source: MockTourSource) -> TourCatalogueService<MockTourSource> {
    TourCatalogueService::new(Arc::new(source))
}

#[rstest]
#[tokio::test]
async fn list_without_keyword_uses_area_listing(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .withf(|request| {
            request.area_code.as_deref() == Some("6")
                && request.content_type.is_none()
                && request.num_of_rows == 12
                && request.page_no == 1
        })
        .times(1)
        .return_once(|_| Ok(page(vec![item("1", "해운대", "20250101000000")], 30)));
    source.expect_search_keyword().never();
    query.area_code = Some("6".to_owned());

    let listing = service(source).list_tours(&query).await.expect("listing");

    assert_eq!(listing.page.total_items, 30);
    assert_eq!(listing.page.total_pages, 3);
    assert_eq!(listing.page.items.len(), 1);
    assert_eq!(listing.map.markers.len(), 1);
    assert_eq!(
        listing.page_window,
        vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3)]
    );
}

#[rstest]
#[tokio::test]
async fn keyword_switches_to_search(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_search_keyword()
        .with(eq("궁궐"), always())
        .times(1)
        .return_once(|_, _| Ok(page(Vec::new(), 0)));
    source.expect_area_based_list().never();
    query.keyword = Some("  궁궐 ".to_owned());

    let listing = service(source).list_tours(&query).await.expect("listing");

    assert_eq!(listing.keyword.as_deref(), Some("궁궐"));
    assert!(listing.page.items.is_empty());
}

#[rstest]
#[tokio::test]
async fn blank_keyword_falls_back_to_listing(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .times(1)
        .return_once(|_| Ok(page(Vec::new(), 0)));
    query.keyword = Some("   ".to_owned());

    let listing = service(source).list_tours(&query).await.expect("listing");
    assert!(listing.keyword.is_none());
}

#[rstest]
#[tokio::test]
async fn several_types_fan_out_and_deduplicate(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .withf(|request| request.content_type == Some(ContentType::TouristSpot))
        .times(1)
        .return_once(|_| {
            Ok(page(
                vec![
                    item("1", "경복궁", "20250101000000"),
                    item("2", "창덕궁", "20250301000000"),
                ],
                2,
            ))
        });
    source
        .expect_area_based_list()
        .withf(|request| request.content_type == Some(ContentType::Restaurant))
        .times(1)
        .return_once(|_| {
            Ok(page(
                vec![
                    item("2", "중복", "20250401000000"),
                    item("3", "광장시장", "20250201000000"),
                ],
                5,
            ))
        });
    query.content_types = vec![ContentType::TouristSpot, ContentType::Restaurant];

    let listing = service(source).list_tours(&query).await.expect("listing");

    let ids: Vec<_> = listing
        .page
        .items
        .iter()
        .map(|summary| summary.content_id.as_str())
        .collect();
    assert_eq!(ids, ["2", "3", "1"]);
    assert_eq!(listing.page.items[0].title, "창덕궁");
    assert_eq!(listing.page.total_items, 7);
}

fn ranked_rows(prefix: &str, request: &TourListRequest, total: u32) -> TourPage {
    let start = (request.page_no - 1) * request.num_of_rows;
    let end = (start + request.num_of_rows).min(total);
    let items = (start..end)
        .map(|n| item(&format!("{prefix}{n:02}"), &format!("{prefix}-{n:02}"), "20250101000000"))
        .collect();
    page(items, u64::from(total))
}

#[rstest]
#[tokio::test]
async fn multi_type_pages_cover_every_record(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .withf(|request| request.content_type == Some(ContentType::TouristSpot))
        .returning(|request| Ok(ranked_rows("1", request, 24)));
    source
        .expect_area_based_list()
        .withf(|request| request.content_type == Some(ContentType::Restaurant))
        .returning(|request| Ok(ranked_rows("2", request, 24)));
    query.content_types = vec![ContentType::TouristSpot, ContentType::Restaurant];
    query.sort = TourSort::Name;
    let service = service(source);

    let mut seen = HashSet::new();
    let mut total_pages = 0;
    for number in 1..=4 {
        query.page = PageRequest::new(number, 12).expect("page request");
        let listing = service.list_tours(&query).await.expect("listing");
        total_pages = listing.page.total_pages;
        assert_eq!(listing.page.items.len(), 12, "page {number}");
        seen.extend(listing.page.items.into_iter().map(|summary| summary.content_id));
    }

    assert_eq!(total_pages, 4);
    assert_eq!(seen.len(), 48);
}

#[rstest]
#[tokio::test]
async fn multi_type_requests_read_from_first_row(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .withf(|request| request.page_no == 1 && request.num_of_rows == 36)
        .times(2)
        .returning(|_| Ok(page(Vec::new(), 0)));
    query.content_types = vec![ContentType::TouristSpot, ContentType::Leisure];
    query.page = PageRequest::new(3, 12).expect("page request");

    service(source).list_tours(&query).await.expect("listing");
}

#[rstest]
#[tokio::test]
async fn name_sort_orders_titles(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source.expect_area_based_list().return_once(|_| {
        Ok(page(
            vec![
                item("1", "덕수궁", "20250101000000"),
                item("2", "경복궁", "20250301000000"),
            ],
            2,
        ))
    });
    query.sort = TourSort::Name;

    let listing = service(source).list_tours(&query).await.expect("listing");
    let titles: Vec<_> = listing.page.items.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["경복궁", "덕수궁"]);
}

#[rstest]
#[tokio::test]
async fn infinite_mode_omits_page_window(mut query: TourListQuery) {
    let mut source = MockTourSource::new();
    source
        .expect_area_based_list()
        .return_once(|_| Ok(page(vec![item("1", "a", "20250101000000")], 40)));
    query.pagination = PaginationMode::Infinite;
    query.view = ListView::Map;

    let listing = service(source).list_tours(&query).await.expect("listing");
    assert!(listing.page_window.is_empty());
    assert!(listing.page.has_more);
    assert_eq!(listing.view, ListView::Map);
}

#[rstest]
#[tokio::test]
async fn provider_failure_surfaces_friendly_error(query: TourListQuery) {
    let mut source = MockTourSource::new();
    source.expect_area_based_list().return_once(|_| {
        Err(TourSourceError::provider(
            "0002",
            "인증키 오류입니다. 관리자에게 문의해주세요.",
        ))
    });

    let err = service(source).list_tours(&query).await.expect_err("error");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.message(), "인증키 오류입니다. 관리자에게 문의해주세요.");
}

#[rstest]
#[case("12a")]
#[case("")]
#[tokio::test]
async fn non_numeric_detail_id_is_not_found(#[case] raw: &str) {
    let mut source = MockTourSource::new();
    source.expect_detail_common().never();

    let err = service(source).tour_detail(raw).await.expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn detail_sections_degrade_independently() {
    let mut source = MockTourSource::new();
    source.expect_detail_common().return_once(|_| {
        Ok(TourDetail {
            item: item("126508", "경복궁", "20250101000000"),
            overview: Some("조선 왕조의 법궁".to_owned()),
            ..TourDetail::default()
        })
    });
    source
        .expect_detail_intro()
        .with(always(), eq("12"))
        .return_once(|_, _| Err(TourSourceError::timeout("slow")));
    source.expect_detail_images().return_once(|_| {
        Ok(vec![TourImage {
            content_id: "126508".to_owned(),
            origin_url: "https://tong.visitkorea.or.kr/a.jpg".to_owned(),
            ..TourImage::default()
        }])
    });
    source.expect_detail_pet_tour().return_once(|_| {
        Ok(Some(PetTourInfo {
            content_id: "126508".to_owned(),
            leash: Some("<br>".to_owned()),
            ..PetTourInfo::default()
        }))
    });

    let view = service(source)
        .tour_detail("126508")
        .await
        .expect("detail view");

    assert!(view.intro.is_none());
    assert_eq!(view.images.len(), 1);
    assert!(view.pet.is_none(), "markup-only pet info is dropped");
    assert!(view.map.is_some());
}

#[rstest]
#[tokio::test]
async fn detail_keeps_intro_when_available() {
    let mut source = MockTourSource::new();
    source.expect_detail_common().return_once(|_| {
        Ok(TourDetail {
            item: item("126508", "경복궁", "20250101000000"),
            ..TourDetail::default()
        })
    });
    source.expect_detail_intro().return_once(|_, _| {
        Ok(TourIntro {
            content_id: "126508".to_owned(),
            content_type_id: "12".to_owned(),
            fields: [("usetime".to_owned(), "09:00~18:00".to_owned())]
                .into_iter()
                .collect(),
        })
    });
    source
        .expect_detail_images()
        .return_once(|_| Err(TourSourceError::transport("reset")));
    source
        .expect_detail_pet_tour()
        .return_once(|_| Err(TourSourceError::provider("0005", "데이터가 없습니다.")));

    let view = service(source)
        .tour_detail("126508")
        .await
        .expect("detail view");

    assert_eq!(
        view.intro.as_ref().and_then(|intro| intro.get("usetime")),
        Some("09:00~18:00")
    );
    assert!(view.images.is_empty());
    assert!(view.pet.is_none());
}

#[rstest]
#[tokio::test]
async fn missing_common_detail_is_not_found() {
    let mut source = MockTourSource::new();
    source
        .expect_detail_common()
        .return_once(|_| Err(TourSourceError::not_found("관광지 정보를 찾을 수 없습니다.")));

    let err = service(source)
        .tour_detail("999")
        .await
        .expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn area_options_fall_back_to_empty() {
    let mut source = MockTourSource::new();
    source
        .expect_area_codes()
        .return_once(|| Err(TourSourceError::timeout("slow")));

    assert!(service(source).area_options().await.is_empty());
}
