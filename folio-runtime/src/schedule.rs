//! # Schedule 模块
//!
//! Runtime 向 Host 提出的调度请求。
//!
//! Runtime 不知道真实时间流逝：需要等待时返回 [`Schedule`]，
//! Host 在帧回调或定时器到期后再以对应的 [`crate::PageInput`] 调用回来。
//!
//! ```text
//! NextFrame             -> 下一动画帧调用 dispatch(AnimationFrame)
//! Timer { kind, delay } -> delay 之后调用 dispatch(Timer(kind))
//! ```

use std::time::Duration;

/// 定时器用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 打字效果推进一步
    TypingTick,
}

/// 调度请求
#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    /// 请求下一动画帧
    NextFrame,

    /// 请求延时回调
    Timer { kind: TimerKind, delay: Duration },
}

impl Schedule {
    /// 创建延时请求
    pub fn timer(kind: TimerKind, delay: Duration) -> Self {
        Self::Timer { kind, delay }
    }
}

/// 一次 dispatch 的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Host 需要取消浏览器默认行为
    pub default_prevented: bool,

    /// Host 需要安排的回调
    pub schedule: Vec<Schedule>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加调度请求
    pub fn push(&mut self, schedule: Schedule) {
        self.schedule.push(schedule);
    }

    /// 标记取消默认行为
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: Response) {
        self.default_prevented |= other.default_prevented;
        self.schedule.extend(other.schedule);
    }

    /// 是否什么也不需要做
    pub fn is_empty(&self) -> bool {
        !self.default_prevented && self.schedule.is_empty()
    }
}

impl From<Schedule> for Response {
    fn from(schedule: Schedule) -> Self {
        Self {
            default_prevented: false,
            schedule: vec![schedule],
        }
    }
}

impl From<Option<Schedule>> for Response {
    fn from(schedule: Option<Schedule>) -> Self {
        schedule.map(Response::from).unwrap_or_default()
    }
}
