//! Integration tests for the source adapters using wiremock
//!
//! Each adapter is exercised against a mock server serving its real
//! schema shape, including the per-source quirks.

use rebang::config::ApiEndpoint;
use rebang::error::FetchError;
use rebang::sources::{
    build_client, HotSource, QqNewsRanking, SinaRanking, TiebaHotTopics, ToutiaoHotBoard,
    WeiboHotSearch,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(name: &str, url: String, show_count: u32) -> ApiEndpoint {
    ApiEndpoint {
        name: name.to_string(),
        url,
        color: "#FFFFFF".to_string(),
        category: "综合".to_string(),
        enabled: true,
        show_count,
    }
}

#[tokio::test]
async fn test_weibo_fetch_normalizes_realtime_list() {
    let server = MockServer::start().await;
    let body = r#"{
        "data": {
            "realtime": [
                {"word": "热搜第一", "num": 3000000},
                {"word": "热搜第二", "num": 1200000},
                {"word": "热搜第三", "num": 800000}
            ]
        }
    }"#;

    Mock::given(method("GET"))
        .and(path("/ajax/side/hotSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint("微博热搜", format!("{}/ajax/side/hotSearch", server.uri()), 2);
    let items = WeiboHotSearch.fetch(&client, &ep).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "热搜第一");
    assert_eq!(items[0].hot, 3_000_000);
    assert_eq!(items[0].rank, 1);
    assert_eq!(items[0].source, "微博");
    assert_eq!(items[1].rank, 2);
}

#[tokio::test]
async fn test_tieba_fetch_normalizes_topic_list() {
    let server = MockServer::start().await;
    let body = r#"{
        "data": {
            "bang_topic": {
                "topic_list": [
                    {"topic_name": "热议话题", "discuss_num": 54321}
                ]
            }
        }
    }"#;

    Mock::given(method("GET"))
        .and(path("/hottopic/browse/topicList"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint(
        "贴吧热议",
        format!("{}/hottopic/browse/topicList", server.uri()),
        10,
    );
    let items = TiebaHotTopics.fetch(&client, &ep).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "热议话题");
    assert_eq!(items[0].hot, 54_321);
    assert_eq!(items[0].source, "贴吧");
}

#[tokio::test]
async fn test_qqnews_fetch_skips_pinned_entry() {
    let server = MockServer::start().await;
    let body = r#"{
        "idlist": [
            {
                "newslist": [
                    {"title": "置顶专题"},
                    {"title": "榜单第一", "hotEvent": {"hotScore": 2500000}},
                    {"title": "榜单第二", "hotEvent": {"hotScore": 1800000}}
                ]
            }
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/gw/event/hot_ranking_list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint(
        "腾讯新闻",
        format!("{}/gw/event/hot_ranking_list?page_size=50", server.uri()),
        10,
    );
    let items = QqNewsRanking.fetch(&client, &ep).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "榜单第一");
    assert_eq!(items[0].rank, 1);
    assert_eq!(items[1].title, "榜单第二");
}

#[tokio::test]
async fn test_sina_fetch_rewrites_url_and_strips_prefix() {
    let server = MockServer::start().await;
    let body = r#"var data = {
        "data": [
            {"title": "国内要闻", "top_num": "123,456"}
        ]
    };"#;

    Mock::given(method("GET"))
        .and(path("/ws/GetTopDataList.php"))
        .and(query_param("top_type", "day"))
        .and(query_param("top_cat", "news_china_suda"))
        .and(query_param("top_show_num", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let adapter = SinaRanking::with_host(&server.uri());
    let ep = endpoint(
        "新浪国内",
        "https://top.news.sina.com.cn/ws/GetTopDataList.php?top_cat=news_china_suda".to_string(),
        10,
    );
    let items = adapter.fetch(&client, &ep).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "国内要闻");
    assert_eq!(items[0].hot, 123_456);
    assert_eq!(items[0].source, "新浪新闻");
}

#[tokio::test]
async fn test_toutiao_fetch_parses_string_scores() {
    let server = MockServer::start().await;
    let body = r#"{
        "data": [
            {"Title": "头条榜首", "HotValue": "9876543"}
        ]
    }"#;

    Mock::given(method("GET"))
        .and(path("/hot-event/hot-board/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint(
        "今日头条",
        format!("{}/hot-event/hot-board/?origin=toutiao_pc", server.uri()),
        10,
    );
    let items = ToutiaoHotBoard.fetch(&client, &ep).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].hot, 9_876_543);
    assert_eq!(items[0].source, "今日头条");
}

#[tokio::test]
async fn test_non_2xx_status_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ajax/side/hotSearch"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint("微博热搜", format!("{}/ajax/side/hotSearch", server.uri()), 5);
    let result = WeiboHotSearch.fetch(&client, &ep).await;

    assert!(matches!(result, Err(FetchError::Status(503))));
}

#[tokio::test]
async fn test_malformed_json_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hottopic/browse/topicList"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint(
        "贴吧热议",
        format!("{}/hottopic/browse/topicList", server.uri()),
        5,
    );
    let result = TiebaHotTopics.fetch(&client, &ep).await;

    assert!(matches!(result, Err(FetchError::Json(_))));
}

#[tokio::test]
async fn test_requests_carry_identification_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ajax/side/hotSearch"))
        .and(wiremock::matchers::header(
            "user-agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"realtime": []}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client().unwrap();
    let ep = endpoint("微博热搜", format!("{}/ajax/side/hotSearch", server.uri()), 5);
    let items = WeiboHotSearch.fetch(&client, &ep).await.unwrap();
    assert!(items.is_empty());
}
